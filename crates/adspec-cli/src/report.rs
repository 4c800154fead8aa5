use adspec_core::{AdSpec, PlatformData, Severity, ValidationResult};

fn mark(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Error => "error",
    }
}

pub fn render_result(file_name: &str, spec: &AdSpec, result: &ValidationResult) -> String {
    let mut s = String::new();
    s.push_str(&format!("{} -> {} ({})\n", file_name, spec.id, spec.title));
    for m in &result.messages {
        s.push_str(&format!("  [{}] {}\n", mark(m.severity), m.text));
    }
    let verdict = if result.is_valid { "PASS" } else { "FAIL" };
    s.push_str(&format!("{}\n", verdict));
    s
}

pub fn render_spec(platform: &PlatformData, spec: &AdSpec) -> String {
    let mut s = String::new();
    s.push_str(&format!("{} / {} [{}]\n", platform.name, spec.title, spec.id));
    s.push_str(&format!("  format:       {}\n", spec.format));
    s.push_str(&format!("  dimensions:   {}\n", spec.dimensions));
    s.push_str(&format!("  aspect ratio: {}\n", spec.aspect_ratio));
    s.push_str(&format!("  file types:   {}\n", spec.file_type.join(", ")));
    s.push_str(&format!("  max size:     {}\n", spec.max_file_size));
    if !spec.notes.is_empty() {
        s.push_str(&format!("  notes:        {}\n", spec.notes));
    }
    if let Some(settings) = &spec.settings {
        s.push_str(&format!("  settings:     {}\n", settings));
    }
    s
}

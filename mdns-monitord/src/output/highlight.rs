use owo_colors::OwoColorize;

/// Wrap a text fragment so it stands out from the surrounding prose.
///
/// With color enabled the fragment is painted in the accent color; without
/// color it is wrapped in plain double quotes so the distinction survives
/// on dumb terminals and in piped output.
pub fn highlight(text: &str, color: bool) -> String {
    if color {
        text.yellow().to_string()
    } else {
        format!("\"{text}\"")
    }
}

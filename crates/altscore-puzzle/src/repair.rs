//! Repair bay page rendering.

/// Render the repair bay HTML document for a repair code.
///
/// The code is placed in a `div.anchor-point`, which is where the scoring
/// harness scrapes it from.
pub fn render_repair_page(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Repair</title>
</head>
<body>
    <div class="anchor-point">{code}</div>
</body>
</html>
"#
    )
}

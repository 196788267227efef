use std::fmt::Write;

use super::compose::{Composition, TextAnchor};

/// Render a composition as a standalone SVG document.
///
/// Unit coordinates are stretched over the canvas with the y axis flipped,
/// so `(0, 0)` is the bottom-left corner.
pub fn render_svg(comp: &Composition) -> String {
    let w = comp.canvas.width as f64;
    let h = comp.canvas.height as f64;
    let px = |x: f64| x * w;
    let py = |y: f64| (1.0 - y) * h;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
        comp.canvas.width, comp.canvas.height
    );
    let _ = writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        comp.background.to_hex()
    );

    for shape in &comp.shapes {
        let points = shape
            .points
            .iter()
            .map(|p| format!("{:.2},{:.2}", px(p.x), py(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            r#"<polygon points="{}" fill="{}" fill-opacity="{:.3}" stroke="none"/>"#,
            points,
            shape.fill.to_hex(),
            shape.opacity
        );
    }

    for text in &comp.texts {
        let anchor = match text.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let style = if text.italic { r#" font-style="italic""# } else { "" };
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" text-anchor="{}" fill="{}"{}>{}</text>"#,
            px(text.position.x),
            py(text.position.y),
            text.size,
            anchor,
            text.color.to_hex(),
            style,
            html_escape::encode_text(&text.text)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::compose::{compose_entry_seeded, EntryArt};
    use crate::models::emotion::{Emotion, EmotionLabel};

    #[test]
    fn test_render_svg_escapes_markup_in_text() {
        let art = EntryArt {
            emotion: Emotion::parse("<script>"),
            date_label: "a&b",
            note: None,
            intensity: 1,
        };
        let comp = compose_entry_seeded(&art, Some(3)).unwrap();
        let svg = render_svg(&comp);

        assert!(svg.contains(">a&amp;b</text>"));
        assert!(svg.contains("&lt;script&gt;</text>"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_render_svg_structure() {
        let art = EntryArt {
            emotion: EmotionLabel::Excited.into(),
            date_label: "2026-02-10",
            note: Some("tom & jerry <3"),
            intensity: 2,
        };
        let comp = compose_entry_seeded(&art, Some(8)).unwrap();
        let svg = render_svg(&comp);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polygon").count(), comp.shapes.len());
        assert_eq!(svg.matches("<text").count(), 3);
        assert!(svg.contains("tom &amp; jerry &lt;3"));
        assert!(svg.contains(r#"stroke="none""#));
        assert!(svg.contains(r#"font-style="italic""#));
    }

    #[test]
    fn test_render_svg_flips_y_axis() {
        let art = EntryArt {
            emotion: EmotionLabel::Calm.into(),
            date_label: "2026-02-10",
            note: None,
            intensity: 1,
        };
        let comp = compose_entry_seeded(&art, Some(8)).unwrap();
        let svg = render_svg(&comp);
        // date label sits at y = 0.95 in unit space, near the top of the canvas
        assert!(svg.contains(r#"<text x="40.00" y="40.00""#));
    }
}

//! Output modes and the top-level render entry points.

use console::Term;
use motodesk_grid::PageView;
use serde::Serialize;

use crate::decorator::TableRenderer;
use crate::error::RenderError;

/// Controls how a page is written.
///
/// # Example
///
/// ```rust
/// use motodesk_render::OutputMode;
///
/// assert!(OutputMode::Term.should_use_color());
/// assert!(!OutputMode::Text.should_use_color());
/// assert!(OutputMode::Json.is_structured());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Styled when stdout supports colors, plain otherwise
    #[default]
    Auto,
    /// Always use ANSI escape codes
    Term,
    /// Never use ANSI escape codes
    Text,
    /// Serialize the data as pretty JSON
    Json,
}

impl OutputMode {
    /// Resolves the mode to a concrete decision about whether to use color.
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
            OutputMode::Json => false,
        }
    }

    /// Returns true for modes that serialize data instead of drawing it.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json)
    }
}

/// Renders one table page in the given mode.
///
/// Structured modes serialize the [`PageView`] itself; the others draw it
/// with `renderer`, styled according to the mode.
pub fn render_page(
    view: &PageView,
    renderer: &TableRenderer,
    mode: OutputMode,
) -> Result<String, RenderError> {
    render_with(view, mode, |color| {
        renderer.clone().styled(color).render(view)
    })
}

/// Renders any serializable value: as JSON in structured modes, otherwise
/// through `text`, which receives whether color is wanted.
pub fn render_with<T, F>(data: &T, mode: OutputMode, text: F) -> Result<String, RenderError>
where
    T: Serialize + ?Sized,
    F: FnOnce(bool) -> String,
{
    if mode.is_structured() {
        return Ok(serde_json::to_string_pretty(data)?);
    }
    Ok(text(mode.should_use_color()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use motodesk_grid::{Column, DataTable, ViewState};
    use serde_json::json;

    fn view() -> PageView {
        let rows = vec![json!({"name": "Triumph Bonneville"})];
        DataTable::new(vec![Column::new("name", "Name")], ["name"])
            .unwrap()
            .view(&rows, &ViewState::new())
    }

    #[test]
    fn output_mode_default_is_auto() {
        assert_eq!(OutputMode::default(), OutputMode::Auto);
    }

    #[test]
    fn text_mode_is_plain() {
        let out = render_page(&view(), &TableRenderer::new(40), OutputMode::Text).unwrap();
        assert!(out.contains("Triumph Bonneville"));
        assert!(!out.contains("\u{1b}["));
    }

    #[test]
    fn term_mode_is_styled() {
        let out = render_page(&view(), &TableRenderer::new(40), OutputMode::Term).unwrap();
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn json_mode_serializes_the_page() {
        let out = render_page(&view(), &TableRenderer::new(40), OutputMode::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["body"]["kind"], "rows");
        assert_eq!(parsed["body"]["cells"][0][0], "Triumph Bonneville");
        assert_eq!(parsed["page_count"], 1);
    }

    #[test]
    fn render_with_only_calls_text_for_drawn_modes() {
        let data = json!({"total": 3});
        let out = render_with(&data, OutputMode::Json, |_| unreachable!()).unwrap();
        assert!(out.contains("\"total\": 3"));

        let out = render_with(&data, OutputMode::Text, |color| format!("color={color}")).unwrap();
        assert_eq!(out, "color=false");
    }
}

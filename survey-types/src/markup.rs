use scraper::Html;

/// Checks option text that is meant to be rendered as HTML.
///
/// Implementations receive the fragment only (no `html`, `head` or `body`
/// wrapper) and return an error describing the first problem they find.
pub trait MarkupValidator: Send + Sync {
    fn validate(&self, fragment: &str) -> anyhow::Result<()>;
}

impl<F> MarkupValidator for F
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync,
{
    fn validate(&self, fragment: &str) -> anyhow::Result<()> {
        self(fragment)
    }
}

/// Accepts a fragment when the HTML5 parser reports no parse errors for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFragmentValidator;

impl MarkupValidator for HtmlFragmentValidator {
    fn validate(&self, fragment: &str) -> anyhow::Result<()> {
        let parsed = Html::parse_fragment(fragment);
        if parsed.errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("{}", parsed.errors.join("; "))
        }
    }
}

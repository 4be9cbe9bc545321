//! Command template rendering with mandatory shell escaping.

use crate::error::HookError;
use crate::payload::HookPayload;

/// Renders a hook's command template into the string handed to `sh -c`.
///
/// Implementations must shell-escape every substituted value; the runner
/// never concatenates payload data into a command itself.
pub trait CommandRenderer: Send + Sync {
    fn render(&self, template: &str, payload: &HookPayload) -> Result<String, HookError>;
}

/// Default renderer: `{name}` placeholders quoted with [`shlex`].
///
/// `{{` and `}}` produce literal braces. An unknown placeholder is a render
/// error rather than pass-through, since an unrendered `{...}` reaching the
/// shell would sidestep escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRenderer;

impl CommandRenderer for ShellRenderer {
    fn render(&self, template: &str, payload: &HookPayload) -> Result<String, HookError> {
        let mut rendered = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    rendered.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    rendered.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(inner) => name.push(inner),
                            None => {
                                return Err(HookError::Render(format!(
                                    "unterminated placeholder `{{{name}`"
                                )));
                            }
                        }
                    }
                    let value = payload
                        .get(&name)
                        .ok_or_else(|| HookError::Render(format!("unknown placeholder `{name}`")))?;
                    let quoted = shlex::try_quote(value).map_err(|err| {
                        HookError::Render(format!("cannot quote value for `{name}`: {err}"))
                    })?;
                    rendered.push_str(&quoted);
                }
                _ => rendered.push(ch),
            }
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::HookEvent;

    fn payload() -> HookPayload {
        HookPayload::new(HookEvent::PrCreate)
            .with("title", "widget")
            .with("number", "7")
    }

    #[test]
    fn plain_values_substitute_bare() {
        let rendered = ShellRenderer
            .render("notify-send {title} {number}", &payload())
            .unwrap();
        assert_eq!(rendered, "notify-send widget 7");
    }

    #[test]
    fn hostile_values_stay_one_shell_word() {
        let payload = HookPayload::new(HookEvent::PrCreate).with("title", "x; $(rm -rf /) 'y'");
        let rendered = ShellRenderer.render("touch {title}", &payload).unwrap();

        let words = shlex::split(&rendered).unwrap();
        assert_eq!(words, vec!["touch".to_string(), "x; $(rm -rf /) 'y'".to_string()]);
    }

    #[test]
    fn double_braces_are_literal() {
        let rendered = ShellRenderer
            .render("echo {{literal}} {number}", &payload())
            .unwrap();
        assert_eq!(rendered, "echo {literal} 7");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let err = ShellRenderer
            .render("echo {nope}", &payload())
            .unwrap_err();
        assert!(err.to_string().contains("unknown placeholder"));
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let err = ShellRenderer.render("echo {title", &payload()).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }
}

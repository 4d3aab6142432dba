//! Element locators for the storefront.
//!
//! Locators follow the shape of the page under test rather than raw
//! selectors: by test id, by ARIA role plus accessible name, or by CSS, with
//! an optional text filter and chaining into descendants
//! (`test_id("sim-detail-info-list").locate(test_id("DATA-value"))`).
//! Each step compiles to one WebDriver query.

use std::fmt;

/// How a single step selects elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "#onetrust-group-container")
    Css(String),
    /// `data-testid` attribute
    TestId(String),
    /// ARIA role with an optional accessible-name filter
    Role {
        role: String,
        name: Option<String>,
    },
}

/// WebDriver location strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Css,
    XPath,
}

impl Strategy {
    /// Name used in the `using` field of a find-element command
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css selector",
            Self::XPath => "xpath",
        }
    }
}

/// A compiled step.
///
/// `text_filter` is set only for CSS steps with a text filter, which CSS
/// cannot express; the driver applies it to the matches itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub strategy: Strategy,
    pub value: String,
    pub text_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub selector: Selector,
    /// Case-insensitive substring the element's text must contain
    pub has_text: Option<String>,
}

impl Step {
    pub fn to_query(&self) -> Query {
        match &self.selector {
            Selector::Css(css) => Query {
                strategy: Strategy::Css,
                value: css.clone(),
                text_filter: self.has_text.clone(),
            },
            Selector::TestId(id) if self.has_text.is_none() => Query {
                strategy: Strategy::Css,
                value: format!("[data-testid={}]", css_string(id)),
                text_filter: None,
            },
            Selector::TestId(id) => Query {
                strategy: Strategy::XPath,
                value: format!(
                    ".//*[@data-testid={}]{}",
                    xpath_literal(id),
                    self.text_predicate()
                ),
                text_filter: None,
            },
            Selector::Role { role, name } => {
                let name_predicate = name
                    .as_deref()
                    .map(|n| {
                        let n = xpath_literal(&n.to_lowercase());
                        format!("[contains({}, {n}) or contains({}, {n})]", lowered("."), lowered("@aria-label"))
                    })
                    .unwrap_or_default();
                Query {
                    strategy: Strategy::XPath,
                    value: format!(
                        ".//*[{}]{name_predicate}{}",
                        role_predicate(role),
                        self.text_predicate()
                    ),
                    text_filter: None,
                }
            }
        }
    }

    fn text_predicate(&self) -> String {
        self.has_text
            .as_deref()
            .map(|t| format!("[contains({}, {})]", lowered("."), xpath_literal(&t.to_lowercase())))
            .unwrap_or_default()
    }
}

/// A chain of steps, each searched inside the matches of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    steps: Vec<Step>,
}

impl Locator {
    fn single(selector: Selector) -> Self {
        Self {
            steps: vec![Step {
                selector,
                has_text: None,
            }],
        }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::single(Selector::Css(selector.into()))
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Self::single(Selector::TestId(id.into()))
    }

    pub fn role(role: impl Into<String>) -> Self {
        Self::single(Selector::Role {
            role: role.into(),
            name: None,
        })
    }

    /// Role with an accessible name, e.g. `role_named("button", "BUY NOW")`
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::single(Selector::Role {
            role: role.into(),
            name: Some(name.into()),
        })
    }

    /// Keep only matches whose text contains `text` (case-insensitive).
    #[must_use]
    pub fn filter_text(mut self, text: impl Into<String>) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.has_text = Some(text.into());
        }
        self
    }

    /// Search for `inner` inside the matches of this locator.
    #[must_use]
    pub fn locate(mut self, inner: Locator) -> Self {
        self.steps.extend(inner.steps);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            match &step.selector {
                Selector::Css(css) => write!(f, "css={css}")?,
                Selector::TestId(id) => write!(f, "test_id={id}")?,
                Selector::Role { role, name: None } => write!(f, "role={role}")?,
                Selector::Role {
                    role,
                    name: Some(name),
                } => write!(f, "role={role}[name={name:?}]")?,
            }
            if let Some(text) = &step.has_text {
                write!(f, "[has_text={text:?}]")?;
            }
        }
        Ok(())
    }
}

/// XPath predicate matching elements that carry `role`, explicitly or implicitly.
fn role_predicate(role: &str) -> String {
    let explicit = format!("@role={}", xpath_literal(role));
    let implicit = match role {
        "button" => Some("self::button or (self::input and (@type='button' or @type='submit'))"),
        "link" => Some("(self::a or self::area) and @href"),
        "listitem" => Some("self::li"),
        "list" => Some("self::ul or self::ol"),
        "textbox" => Some("self::textarea or (self::input and (not(@type) or @type='text' or @type='search'))"),
        "heading" => Some("self::h1 or self::h2 or self::h3 or self::h4 or self::h5 or self::h6"),
        _ => None,
    };
    match implicit {
        Some(implicit) => format!("{implicit} or {explicit}"),
        None => explicit,
    }
}

fn lowered(expr: &str) -> String {
    format!(
        "translate(normalize-space({expr}), 'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz')"
    )
}

/// Quote `s` as a CSS string: only backslash and double quote need escaping.
pub fn css_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote `s` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// built with `concat()`.
pub fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        return format!("'{s}'");
    }
    if !s.contains('"') {
        return format!("\"{s}\"");
    }
    let parts: Vec<String> = s
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

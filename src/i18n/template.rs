//! Named placeholder substitution
//!
//! Templates use `{name}` placeholders and `{{` / `}}` for literal braces.
//! The name is everything up to the first `.`, `[`, `:` or `!`, so `{my-key}`
//! and `{名前}` are valid names.
//!
//! A `:` introduces a format spec of the form
//! `[[fill]align][0][width][.precision][type]`, where `align` is one of
//! `<`, `>`, `^` and `type` is one of `s`, `d`, `f`. Specs are applied to the
//! value's `Display` output: text that parses as a number counts as a number
//! (right-aligned by default, accepted by `d` and `f`), anything else is text
//! (left-aligned, truncated by precision).
//!
//! Not supported, and reported as errors: positional fields (`{}`, `{0}`),
//! attribute or index access (`{user.name}`, `{items[0]}`), conversions
//! (`{name!r}`), nested specs, and the sign, `#`, `,`, `_` and `=` options.

use std::fmt::Display;

use super::error::TemplateError;

/// Named values substituted into a template
pub type Args<'a> = [(&'a str, &'a dyn Display)];

/// Substitute `args` into `template`
///
/// Arguments that the template does not mention are ignored. A format spec
/// that does not fit the value (`{name:d}` with `name = "Sam"`) is an error,
/// as is any spec outside the subset described in the module docs.
pub fn render(template: &str, args: &Args<'_>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let start = pos + 1;
                let end = loop {
                    match chars.next() {
                        Some((i, '}')) => break i,
                        Some((_, '{')) => {
                            return Err(TemplateError::UnsupportedField(
                                template[start..].to_string(),
                            ))
                        }
                        Some(_) => {}
                        None => return Err(TemplateError::UnclosedBrace(pos)),
                    }
                };

                out.push_str(&substitute(&template[start..end], args)?);
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(TemplateError::StrayClosingBrace(pos));
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

fn substitute(field: &str, args: &Args<'_>) -> Result<String, TemplateError> {
    let name_end = field.find(['.', '[', ':', '!']).unwrap_or(field.len());
    let (name, rest) = field.split_at(name_end);

    if is_positional(name) {
        return Err(TemplateError::UnsupportedField(field.to_string()));
    }

    let value = args
        .iter()
        .find(|(arg, _)| *arg == name)
        .map(|(_, value)| value)
        .ok_or_else(|| TemplateError::MissingArgument(name.to_string()))?;
    let text = value.to_string();

    if rest.is_empty() {
        return Ok(text);
    }
    let Some(spec) = rest.strip_prefix(':') else {
        return Err(TemplateError::UnsupportedField(field.to_string()));
    };

    FormatSpec::parse(spec)
        .ok_or_else(|| TemplateError::UnsupportedField(field.to_string()))?
        .apply(&text)
        .ok_or_else(|| TemplateError::InvalidFormat {
            name: name.to_string(),
            spec: spec.to_string(),
        })
}

fn is_positional(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    fill: char,
    align: Option<Align>,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    ty: Option<char>,
}

impl FormatSpec {
    fn parse(spec: &str) -> Option<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;

        let (fill, align) = match chars.as_slice() {
            [fill, align, ..] if Align::from_char(*align).is_some() => {
                i = 2;
                (*fill, Align::from_char(*align))
            }
            [align, ..] if Align::from_char(*align).is_some() => {
                i = 1;
                (' ', Align::from_char(*align))
            }
            _ => (' ', None),
        };

        let zero = chars.get(i) == Some(&'0');
        if zero {
            i += 1;
        }

        let width = take_number(&chars, &mut i).unwrap_or(0);

        let precision = if chars.get(i) == Some(&'.') {
            i += 1;
            Some(take_number(&chars, &mut i)?)
        } else {
            None
        };

        let ty = match chars.get(i) {
            Some(&c) if matches!(c, 's' | 'd' | 'f') => {
                i += 1;
                Some(c)
            }
            _ => None,
        };

        (i == chars.len()).then_some(Self {
            fill,
            align,
            zero,
            width,
            precision,
            ty,
        })
    }

    /// `None` when the spec cannot apply to `text`
    fn apply(&self, text: &str) -> Option<String> {
        let numeric = text.parse::<f64>().is_ok();

        let (body, is_number) = match (self.ty, self.precision) {
            (Some('d'), None) => (text.parse::<i64>().ok()?.to_string(), true),
            (Some('d'), Some(_)) => return None,
            (Some('f'), precision) => {
                let value = text.parse::<f64>().ok()?;
                (format!("{:.*}", precision.unwrap_or(6), value), true)
            }
            // Numeric precision without a type is general formatting
            (_, Some(_)) if numeric && self.ty.is_none() => return None,
            (_, Some(precision)) => (text.chars().take(precision).collect(), false),
            (_, None) => (text.to_string(), numeric && self.ty.is_none()),
        };

        Some(self.pad(body, is_number))
    }

    fn pad(&self, body: String, is_number: bool) -> String {
        let len = body.chars().count();
        if self.width <= len {
            return body;
        }
        let padding = self.width - len;

        if self.zero && self.align.is_none() && is_number {
            let (sign, digits) = match body.strip_prefix('-') {
                Some(digits) => ("-", digits),
                None => ("", body.as_str()),
            };
            return format!("{sign}{}{digits}", "0".repeat(padding));
        }

        let fill = if self.zero && self.align.is_none() {
            '0'
        } else {
            self.fill
        };
        let default = if is_number { Align::Right } else { Align::Left };
        let (left, right) = match self.align.unwrap_or(default) {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
        };

        let mut out = String::with_capacity(body.len() + padding);
        out.extend(std::iter::repeat(fill).take(left));
        out.push_str(&body);
        out.extend(std::iter::repeat(fill).take(right));
        out
    }
}

fn take_number(chars: &[char], i: &mut usize) -> Option<usize> {
    let start = *i;
    while chars.get(*i).is_some_and(char::is_ascii_digit) {
        *i += 1;
    }
    if *i == start {
        return None;
    }
    chars[start..*i].iter().collect::<String>().parse().ok()
}

//! Option markup.
//!
//! Renders choices as `<option>` elements that carry their tree metadata in
//! `data-*` attributes, and reads such markup back into [`ControlOption`]s.
//!
//! ```text
//! <option value="3" data-tree-id="1" data-left-value="4" selected="selected">|--|-- Rust</option>
//! ```

use std::collections::HashSet;

use mptt_selectbox_core::logging::targets;
use mptt_selectbox_core::{Result, SelectError};
use quick_xml::escape::{escape, resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::choice::{Choice, ChoiceEntry};
use crate::config::SelectorConfig;
use crate::model::ControlOption;

/// Renders a single option.
///
/// Attribute names are written as-is; configurations loaded from files are
/// checked by [`SelectorConfig::validate`].
pub fn render_option(choice: &Choice, selected: bool, config: &SelectorConfig) -> String {
    let selected_html = if selected { r#" selected="selected""# } else { "" };
    format!(
        r#"<option value="{}" {}="{}" {}="{}"{}>{}</option>"#,
        escape(choice.value.as_str()),
        config.tree_id_attribute,
        choice.sort_fields.0,
        config.left_value_attribute,
        choice.sort_fields.1,
        selected_html,
        escape(choice.label.as_str()),
    )
}

/// Renders entries as option markup, one element per line.
///
/// Options whose value is in `selected_values` are marked selected. Groups
/// are wrapped in `<optgroup>`.
pub fn render_options(
    entries: &[ChoiceEntry],
    selected_values: &[&str],
    config: &SelectorConfig,
) -> String {
    let selected: HashSet<&str> = selected_values.iter().copied().collect();
    let is_selected = |choice: &Choice| selected.contains(choice.value.as_str());

    let mut output = Vec::new();
    for entry in entries {
        match entry {
            ChoiceEntry::Single(choice) => {
                output.push(render_option(choice, is_selected(choice), config));
            }
            ChoiceEntry::Group { label, choices } => {
                output.push(format!(r#"<optgroup label="{}">"#, escape(label.as_str())));
                for choice in choices {
                    output.push(render_option(choice, is_selected(choice), config));
                }
                output.push("</optgroup>".to_string());
            }
        }
    }
    output.join("\n")
}

/// An option whose closing tag has not been read yet.
struct PendingOption {
    option: ControlOption,
    has_value: bool,
}

impl PendingOption {
    fn finish(mut self) -> ControlOption {
        if !self.has_value {
            self.option.value = self.option.text.clone();
        }
        self.option
    }
}

/// Reads every `<option>` element of `markup`, including options nested in
/// `<optgroup>`s.
///
/// An option without a `value` attribute uses its text as value. A
/// `selected` attribute, with or without a value, marks the option
/// selected. Attribute names are matched without regard to case and all
/// other attributes are kept under their lowercased name. Named HTML
/// entities are resolved in text and attribute values.
pub fn parse_options(markup: &str) -> Result<Vec<ControlOption>> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut options = Vec::new();
    let mut pending: Option<PendingOption> = None;

    loop {
        match reader.read_event().map_err(SelectError::markup)? {
            Event::Start(start) if is_option(&start) => {
                if pending.is_some() {
                    return Err(SelectError::markup("nested <option> element"));
                }
                pending = Some(pending_from_start(&start)?);
            }
            Event::Empty(start) if is_option(&start) => {
                options.push(pending_from_start(&start)?.finish());
            }
            Event::Text(text) => {
                if let Some(pending) = pending.as_mut() {
                    let text = text
                        .unescape_with(resolve_entity)
                        .map_err(SelectError::markup)?;
                    pending.option.text.push_str(&text);
                }
            }
            Event::End(end) if end.name().as_ref().eq_ignore_ascii_case(b"option") => {
                if let Some(pending) = pending.take() {
                    options.push(pending.finish());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if pending.is_some() {
        return Err(SelectError::markup("unterminated <option> element"));
    }

    tracing::trace!(target: targets::MARKUP, count = options.len(), "parsed option markup");
    Ok(options)
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}

fn is_option(start: &BytesStart<'_>) -> bool {
    start.name().as_ref().eq_ignore_ascii_case(b"option")
}

fn pending_from_start(start: &BytesStart<'_>) -> Result<PendingOption> {
    let mut pending = PendingOption {
        option: ControlOption::default(),
        has_value: false,
    };

    for attr in start.html_attributes() {
        let attr = attr.map_err(SelectError::markup)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = attr
            .unescape_value_with(resolve_entity)
            .map_err(SelectError::markup)?
            .into_owned();
        match key.as_str() {
            "value" => {
                pending.option.value = value;
                pending.has_value = true;
            }
            "selected" => pending.option.selected = true,
            _ => {
                pending.option.attributes.insert(key, value);
            }
        }
    }

    Ok(pending)
}

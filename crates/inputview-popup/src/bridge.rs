#![forbid(unsafe_code)]

//! JSON command channel between the keyboard controller and the popup.
//!
//! The controller drives the popup window with three messages:
//!
//! ```json
//! {"kind":"setAccents","accents":["é","è"],"columns":3,"rows":1,"width":40,"height":48,"startKeyIndex":1}
//! {"kind":"highlightItem","x":512,"y":700,"offset":24}
//! {"kind":"highlightedAccent"}
//! ```
//!
//! Key sizes arrive as JS numbers and are rounded to whole pixels. Pointer
//! coordinates and the offset are kept as sent, so a finger a fraction of a
//! pixel inside a key edge still hits that key. A `highlightItem` without
//! `offset` uses the session's configured default.

use crate::hit::HighlightChange;
use crate::popup::AccentPopup;
use inputview_layout::LayoutError;
use serde::{Deserialize, Serialize};

/// Errors from decoding or applying a host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown command kind.
    UnknownKind(String),
    /// The layout arguments were rejected.
    Layout(LayoutError),
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownKind(kind) => write!(f, "unknown command kind: {kind}"),
            Self::Layout(err) => write!(f, "layout rejected: {err}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LayoutError> for BridgeError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

/// A decoded host command.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupCommand {
    SetAccents {
        accents: Vec<String>,
        columns: usize,
        rows: usize,
        width: i32,
        height: i32,
        start_key_index: usize,
    },
    HighlightItem {
        x: f64,
        y: f64,
        offset: Option<f64>,
    },
    HighlightedAccent,
}

/// Reply sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandReply {
    /// Accents attached.
    Ack,
    /// Outcome of a highlight update.
    Highlight { change: HighlightChange },
    /// Highlighted accent text, `""` when there is none.
    Accent { text: String },
}

/// Deserialization target matching the controller's message schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCommand {
    kind: String,
    #[serde(default)]
    accents: Option<Vec<String>>,
    #[serde(default)]
    columns: Option<usize>,
    #[serde(default)]
    rows: Option<usize>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    start_key_index: Option<usize>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    offset: Option<f64>,
}

/// Round a JS key size to whole pixels; `as` saturates out-of-range values
/// and maps NaN to 0.
fn px(v: f64) -> i32 {
    v.round() as i32
}

/// Parse one JSON command from the host.
pub fn parse_command(json: &str) -> Result<PopupCommand, BridgeError> {
    let raw: RawCommand =
        serde_json::from_str(json).map_err(|e| BridgeError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "setAccents" => Ok(PopupCommand::SetAccents {
            accents: raw.accents.ok_or(BridgeError::MissingField("accents"))?,
            columns: raw.columns.ok_or(BridgeError::MissingField("columns"))?,
            rows: raw.rows.ok_or(BridgeError::MissingField("rows"))?,
            width: raw.width.map(px).ok_or(BridgeError::MissingField("width"))?,
            height: raw.height.map(px).ok_or(BridgeError::MissingField("height"))?,
            start_key_index: raw
                .start_key_index
                .ok_or(BridgeError::MissingField("startKeyIndex"))?,
        }),
        "highlightItem" => Ok(PopupCommand::HighlightItem {
            x: raw.x.ok_or(BridgeError::MissingField("x"))?,
            y: raw.y.ok_or(BridgeError::MissingField("y"))?,
            offset: raw.offset,
        }),
        "highlightedAccent" => Ok(PopupCommand::HighlightedAccent),
        other => Err(BridgeError::UnknownKind(other.to_owned())),
    }
}

impl AccentPopup {
    /// Apply a decoded command. Highlight updates use the view's own
    /// layout at the configured origin.
    pub fn dispatch(&mut self, command: PopupCommand) -> Result<CommandReply, BridgeError> {
        match command {
            PopupCommand::SetAccents {
                accents,
                columns,
                rows,
                width,
                height,
                start_key_index,
            } => {
                self.set_accents(&accents, columns, rows, width, height, start_key_index)?;
                Ok(CommandReply::Ack)
            }
            PopupCommand::HighlightItem { x, y, offset } => {
                let offset = offset.unwrap_or(self.config().default_offset);
                let change = self.highlight_item_at(x, y, offset);
                Ok(CommandReply::Highlight { change })
            }
            PopupCommand::HighlightedAccent => Ok(CommandReply::Accent {
                text: self.highlighted_accent().unwrap_or_default().to_owned(),
            }),
        }
    }

    /// Parse, apply, and encode the reply in one step.
    pub fn dispatch_json(&mut self, json: &str) -> Result<String, BridgeError> {
        let reply = self.dispatch(parse_command(json)?)?;
        serde_json::to_string(&reply).map_err(|e| BridgeError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PopupConfig;
    use crate::hit::CellRef;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_set_accents() {
        let cmd = parse_command(
            r#"{"kind":"setAccents","accents":["é","è"],"columns":3,"rows":1,"width":40.4,"height":47.6,"startKeyIndex":1}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            PopupCommand::SetAccents {
                accents: vec!["é".into(), "è".into()],
                columns: 3,
                rows: 1,
                width: 40,
                height: 48,
                start_key_index: 1,
            }
        );
    }

    #[test]
    fn parses_highlight_without_offset() {
        let cmd = parse_command(r#"{"kind":"highlightItem","x":10.5,"y":-3}"#).unwrap();
        assert_eq!(
            cmd,
            PopupCommand::HighlightItem {
                x: 10.5,
                y: -3.0,
                offset: None
            }
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse_command("{"), Err(BridgeError::Json(_))));
        assert_eq!(
            parse_command(r#"{"kind":"highlightItem","x":1}"#),
            Err(BridgeError::MissingField("y"))
        );
        assert_eq!(
            parse_command(r#"{"kind":"setAccents","accents":[],"columns":1,"rows":1,"width":1,"height":1}"#),
            Err(BridgeError::MissingField("startKeyIndex"))
        );
        assert_eq!(
            parse_command(r#"{"kind":"resize"}"#),
            Err(BridgeError::UnknownKind("resize".into()))
        );
    }

    #[test]
    fn json_round_trip_through_session() {
        let mut popup = AccentPopup::new(PopupConfig::default().with_default_offset(5.0));
        let ack = popup
            .dispatch_json(
                r#"{"kind":"setAccents","accents":["ü","ú"],"columns":2,"rows":1,"width":10,"height":10,"startKeyIndex":0}"#,
            )
            .unwrap();
        assert_eq!(ack, r#"{"kind":"ack"}"#);

        // Above the popup but inside the default tolerance.
        let reply = popup
            .dispatch(PopupCommand::HighlightItem {
                x: 15.0,
                y: -3.0,
                offset: None,
            })
            .unwrap();
        assert_eq!(
            reply,
            CommandReply::Highlight {
                change: HighlightChange::Moved {
                    from: None,
                    to: Some(CellRef::new(0, 1))
                }
            }
        );

        let accent = popup.dispatch_json(r#"{"kind":"highlightedAccent"}"#).unwrap();
        assert_eq!(accent, r#"{"kind":"accent","text":"ú"}"#);
    }

    #[test]
    fn fractional_coordinate_past_key_edge() {
        let mut popup = AccentPopup::default();
        popup
            .dispatch_json(
                r#"{"kind":"setAccents","accents":["a","b"],"columns":2,"rows":1,"width":10,"height":10,"startKeyIndex":0}"#,
            )
            .unwrap();

        let reply = popup
            .dispatch_json(r#"{"kind":"highlightItem","x":10.4,"y":5,"offset":0}"#)
            .unwrap();
        assert_eq!(
            reply,
            r#"{"kind":"highlight","change":{"Moved":{"from":null,"to":{"row":0,"column":1}}}}"#
        );
        let accent = popup.dispatch_json(r#"{"kind":"highlightedAccent"}"#).unwrap();
        assert_eq!(accent, r#"{"kind":"accent","text":"b"}"#);

        popup
            .dispatch_json(r#"{"kind":"highlightItem","x":9.6,"y":5,"offset":0}"#)
            .unwrap();
        assert_eq!(popup.highlighted_accent(), Some("a"));

        // Exactly on the shared edge: neither key.
        popup
            .dispatch_json(r#"{"kind":"highlightItem","x":10,"y":5,"offset":0}"#)
            .unwrap();
        assert_eq!(popup.highlighted_accent(), None);
    }

    #[test]
    fn empty_accent_reply() {
        let mut popup = AccentPopup::default();
        assert_eq!(
            popup.dispatch(PopupCommand::HighlightedAccent).unwrap(),
            CommandReply::Accent {
                text: String::new()
            }
        );
    }

    #[test]
    fn layout_error_surfaces() {
        let mut popup = AccentPopup::default();
        let err = popup
            .dispatch_json(
                r#"{"kind":"setAccents","accents":["a"],"columns":2,"rows":1,"width":10,"height":10,"startKeyIndex":2}"#,
            )
            .unwrap_err();
        assert!(matches!(err, BridgeError::Layout(LayoutError::InvalidArgument(_))));
        assert!(std::error::Error::source(&err).is_some());
    }
}

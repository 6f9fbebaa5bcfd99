//! Structured canvas actions decoded from an assistant response.
//!
//! Execution is per-item: one unresolvable action is recorded as skipped and
//! the rest of the batch still runs. New elements are auto-placed relative to
//! the editor's current selection, so "add a box" lands next to whatever the
//! user was working with.

use serde::{Deserialize, Serialize};

use flow_core::{Editor, ElementId, ShapeKind};

/// One canvas command from the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AssistantAction {
    /// Create a default-size shape with a text label, auto-placed near the
    /// current selection.
    CreateElement {
        /// Box or circle.
        kind: ShapeKind,
        /// Text label for the new shape.
        text: String,
    },
    /// Connect two existing shapes with an arrow.
    Connect {
        /// Shape the arrow starts from.
        start_id: ElementId,
        /// Shape the arrow points to.
        end_id: ElementId,
    },
}

/// What happened to one action in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A shape was created with this id.
    Created {
        /// The new shape's id.
        id: ElementId,
    },
    /// A connector was created with this id.
    Connected {
        /// The new connector's id.
        id: ElementId,
    },
    /// The action could not be applied and was skipped.
    Skipped {
        /// Human-readable reason, suitable for the assistant transcript.
        reason: String,
    },
}

/// Decode a JSON array of actions.
///
/// # Errors
///
/// Returns [`crate::AssistantError::Decode`] when the payload is not a valid
/// action array.
pub fn decode_actions(json: &str) -> crate::AssistantResult<Vec<AssistantAction>> {
    Ok(serde_json::from_str(json)?)
}

/// Apply a batch of actions to the editor, in order.
///
/// Each action yields exactly one [`ActionOutcome`]; a skipped action never
/// aborts the batch. Shapes created earlier in the batch become part of the
/// selection-independent store immediately, so a later `Connect` can
/// reference them.
pub fn execute(editor: &mut Editor, actions: Vec<AssistantAction>) -> Vec<ActionOutcome> {
    actions
        .into_iter()
        .map(|action| apply(editor, action))
        .collect()
}

fn apply(editor: &mut Editor, action: AssistantAction) -> ActionOutcome {
    match action {
        AssistantAction::CreateElement { kind, text } => {
            let id = editor.place_shape(kind, text);
            tracing::debug!("assistant created shape {id}");
            ActionOutcome::Created { id }
        }
        AssistantAction::Connect { start_id, end_id } => match editor.connect(start_id, end_id) {
            Some(id) => {
                tracing::debug!("assistant connected {start_id} -> {end_id} as {id}");
                ActionOutcome::Connected { id }
            }
            None => ActionOutcome::Skipped {
                reason: format!("could not connect {start_id} to {end_id}"),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::{Point, Shape};

    #[test]
    fn test_create_then_connect_in_one_batch() {
        let mut editor = Editor::new();
        let outcomes = execute(
            &mut editor,
            vec![
                AssistantAction::CreateElement {
                    kind: ShapeKind::Box,
                    text: "Start".to_string(),
                },
                AssistantAction::CreateElement {
                    kind: ShapeKind::Circle,
                    text: "End".to_string(),
                },
            ],
        );

        let ids: Vec<ElementId> = outcomes
            .iter()
            .map(|o| match o {
                ActionOutcome::Created { id } => *id,
                other => panic!("expected Created, got {other:?}"),
            })
            .collect();

        let outcomes = execute(
            &mut editor,
            vec![AssistantAction::Connect {
                start_id: ids[0],
                end_id: ids[1],
            }],
        );
        assert!(matches!(outcomes[0], ActionOutcome::Connected { .. }));
        assert_eq!(editor.store().connectors().count(), 1);
    }

    #[test]
    fn test_created_shapes_do_not_overlap() {
        let mut editor = Editor::new();
        for i in 0..4 {
            execute(
                &mut editor,
                vec![AssistantAction::CreateElement {
                    kind: ShapeKind::Box,
                    text: format!("step {i}"),
                }],
            );
        }
        let bounds: Vec<_> = editor.store().shapes().map(Shape::bounds).collect();
        for (i, a) in bounds.iter().enumerate() {
            for b in &bounds[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_creation_anchors_to_selection() {
        let mut editor = Editor::new();
        let anchor = editor.create_element(
            Shape::new(ShapeKind::Box, Point::new(100.0, 100.0), 200.0, 60.0).into(),
        );
        editor.set_active(anchor);

        let outcomes = execute(
            &mut editor,
            vec![AssistantAction::CreateElement {
                kind: ShapeKind::Box,
                text: "next".to_string(),
            }],
        );
        let ActionOutcome::Created { id } = outcomes[0] else {
            panic!("expected Created");
        };
        let created = editor.store().get(id).expect("shape").as_shape().expect("shape");
        // First anchored candidate: directly right of the selection.
        assert_eq!(created.position, Point::new(360.0, 100.0));
        assert_eq!(created.text, "next");
    }

    #[test]
    fn test_skipped_action_does_not_abort_batch() {
        let mut editor = Editor::new();
        let outcomes = execute(
            &mut editor,
            vec![
                AssistantAction::Connect {
                    start_id: ElementId::new(),
                    end_id: ElementId::new(),
                },
                AssistantAction::CreateElement {
                    kind: ShapeKind::Box,
                    text: "survives".to_string(),
                },
            ],
        );
        assert!(matches!(outcomes[0], ActionOutcome::Skipped { .. }));
        assert!(matches!(outcomes[1], ActionOutcome::Created { .. }));
        assert_eq!(editor.store().len(), 1);
    }

    #[test]
    fn test_duplicate_connect_is_skipped() {
        let mut editor = Editor::new();
        let a = editor
            .create_element(Shape::new(ShapeKind::Box, Point::new(0.0, 0.0), 100.0, 60.0).into());
        let b = editor.create_element(
            Shape::new(ShapeKind::Box, Point::new(300.0, 0.0), 100.0, 60.0).into(),
        );
        let first = execute(
            &mut editor,
            vec![AssistantAction::Connect {
                start_id: a,
                end_id: b,
            }],
        );
        assert!(matches!(first[0], ActionOutcome::Connected { .. }));

        let second = execute(
            &mut editor,
            vec![AssistantAction::Connect {
                start_id: b,
                end_id: a,
            }],
        );
        assert!(matches!(second[0], ActionOutcome::Skipped { .. }));
        assert_eq!(editor.store().connectors().count(), 1);
    }

    #[test]
    fn test_decode_action_payload() {
        let json = r#"[
            {"action": "create_element", "kind": "box", "text": "Login"},
            {"action": "create_element", "kind": "circle", "text": "Done"}
        ]"#;
        let actions = decode_actions(json).expect("decode");
        assert_eq!(actions.len(), 2);
        assert_eq!(
            actions[0],
            AssistantAction::CreateElement {
                kind: ShapeKind::Box,
                text: "Login".to_string(),
            }
        );
        assert!(decode_actions("not json").is_err());
    }

    #[test]
    fn test_snapshot_contract_after_execution() {
        let mut editor = Editor::new();
        execute(
            &mut editor,
            vec![AssistantAction::CreateElement {
                kind: ShapeKind::Box,
                text: "only".to_string(),
            }],
        );
        let json = editor.snapshot().to_json().expect("snapshot json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let elements = value["elements"].as_array().expect("elements array");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0]["type"], "box");
        assert_eq!(elements[0]["text"], "only");
        assert!(elements[0]["width"].is_number());
        assert!(elements[0].get("end_position").is_none());
    }

    #[test]
    fn test_outcomes_preserve_batch_order() {
        let mut editor = Editor::new();
        let outcomes = execute(
            &mut editor,
            vec![
                AssistantAction::CreateElement {
                    kind: ShapeKind::Box,
                    text: "a".to_string(),
                },
                AssistantAction::Connect {
                    start_id: ElementId::new(),
                    end_id: ElementId::new(),
                },
                AssistantAction::CreateElement {
                    kind: ShapeKind::Circle,
                    text: "b".to_string(),
                },
            ],
        );
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], ActionOutcome::Created { .. }));
        assert!(matches!(outcomes[1], ActionOutcome::Skipped { .. }));
        assert!(matches!(outcomes[2], ActionOutcome::Created { .. }));
    }
}

//! Integration tests for editing and navigation workflows
//!
//! These tests drive the simulation host the way an editor would and check
//! what the user ends up seeing.

use assistd::{SimHost, JUMP_COMMAND, POP_COMMAND};
use dialect_types::{CommandId, DocumentId, LanguageId, TextPosition, TextRange};
use marker_highlight::MarkerClass;
use services_navigator::{NavigationOutcome, IDLE_TEXT};
use services_settings::{create_default_registry, keys, SettingValue, SettingsRegistry};

const LOGIN_FLOW: &str = r#"states:
  login:
    transitions:
      next: "confirm"
      error: 'timeout'
  confirm:
    transitions:
      back: login
      done: finished
  timeout:
    # TODO: retry policy
    transitions:
      retry: login
"#;

fn open(host: &mut SimHost, path: &str, text: &str) -> DocumentId {
    let id = DocumentId::new(path);
    host.open_document(id.clone(), LanguageId::from_path(path), text);
    id
}

fn jump(host: &mut SimHost, target: &str) -> NavigationOutcome {
    host.execute(&CommandId::new(JUMP_COMMAND), &[target.to_string()])
        .unwrap()
}

fn back(host: &mut SimHost) -> NavigationOutcome {
    host.execute(&CommandId::new(POP_COMMAND), &[]).unwrap()
}

#[test]
fn test_lenses_for_every_transition() {
    let mut host = SimHost::new(&create_default_registry());
    let flow = open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    let lenses = host.lenses(&flow);
    let placed: Vec<(usize, &str)> = lenses
        .iter()
        .map(|l| (l.range.start.line, l.command.arguments[0].as_str()))
        .collect();
    assert_eq!(
        placed,
        vec![
            (3, "confirm"),
            (4, "timeout"),
            (7, "login"),
            (8, "finished"),
            (12, "login"),
        ]
    );
    assert!(lenses.iter().all(|l| l.range.is_empty()));
    assert_eq!(lenses[1].command.title, "➡️ Transition to 'timeout'");
}

#[test]
fn test_todo_in_flow_is_highlighted() {
    let mut host = SimHost::new(&create_default_registry());
    let flow = open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    let decorations = host.decorations(&flow);
    assert_eq!(decorations.len(), 1);
    assert_eq!(decorations[0].class, MarkerClass::Todo);
    assert_eq!(
        decorations[0].range,
        TextRange::new(TextPosition::new(10, 6), TextPosition::new(10, 24))
    );
    assert_eq!(decorations[0].hover, "📝 TODO: retry policy");
    assert_eq!(decorations[0].style.border, "1px solid gold");
}

#[test]
fn test_lens_click_walks_the_flow() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    // Follow next -> confirm
    host.click_lens(0).unwrap();
    assert_eq!(host.viewport(), Some((5, 5)));

    // Then back -> login
    host.click_lens(2).unwrap();
    assert_eq!(host.viewport(), Some((1, 1)));
    assert_eq!(host.session().history(), ["confirm", "login"]);
    assert_eq!(
        host.session().status().text,
        "$(circuit-board) confirm → login"
    );
    assert_eq!(
        host.session().status().command,
        Some(CommandId::new(POP_COMMAND))
    );

    // Clicking the indicator goes back to confirm
    host.click_status().unwrap();
    assert_eq!(host.session().history(), ["confirm"]);
    assert_eq!(host.viewport(), Some((5, 5)));
}

#[test]
fn test_jump_from_selected_line() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    host.select_line(4).unwrap();
    let outcome = host
        .execute(&CommandId::new(JUMP_COMMAND), &[])
        .unwrap();
    assert_eq!(
        outcome,
        NavigationOutcome::Jumped {
            state: "timeout".to_string(),
            line: 9,
            pushed: true,
        }
    );
}

#[test]
fn test_empty_target_falls_back_to_selected_line() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    host.select_line(3).unwrap();
    let outcome = jump(&mut host, "");
    assert_eq!(
        outcome,
        NavigationOutcome::Jumped {
            state: "confirm".to_string(),
            line: 5,
            pushed: true,
        }
    );
    assert!(host.render().notifications.is_empty());
}

#[test]
fn test_jump_twice_keeps_single_entry() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    jump(&mut host, "confirm");
    let outcome = jump(&mut host, "confirm");
    assert!(matches!(outcome, NavigationOutcome::Jumped { pushed: false, .. }));
    assert_eq!(host.session().history(), ["confirm"]);
}

#[test]
fn test_back_on_single_entry_is_noop() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    jump(&mut host, "timeout");
    host.select_line(2).unwrap();

    assert_eq!(back(&mut host), NavigationOutcome::Unchanged);
    assert_eq!(host.session().history(), ["timeout"]);
    assert_eq!(host.viewport(), Some((2, 9)));
}

#[test]
fn test_unknown_target_reports_and_keeps_history() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    jump(&mut host, "confirm");

    // The "done: finished" lens points at an undeclared state
    host.click_lens(3).unwrap();
    assert_eq!(host.session().history(), ["confirm"]);

    // A line that is not a transition
    host.select_line(0).unwrap();
    assert!(host.execute(&CommandId::new(JUMP_COMMAND), &[]).is_err());

    let render = host.render();
    assert_eq!(
        render.notifications,
        vec![
            "State 'finished' not found.".to_string(),
            "No valid YAML state name found on selected line states:".to_string(),
        ]
    );
    assert_eq!(render.history, vec!["confirm".to_string()]);
}

#[test]
fn test_document_switch_resets_breadcrumbs() {
    let mut host = SimHost::new(&create_default_registry());
    let login = open(&mut host, "flows/login.yaml", LOGIN_FLOW);
    let other = open(&mut host, "flows/other.yaml", LOGIN_FLOW);

    host.activate(&login).unwrap();
    jump(&mut host, "login");
    jump(&mut host, "confirm");
    assert_eq!(host.session().history(), ["login", "confirm"]);

    // Closing the editor keeps the history
    host.close_active();
    assert_eq!(host.session().history().len(), 2);

    // Coming back to the same document keeps it too
    host.activate(&login).unwrap();
    assert_eq!(host.session().history().len(), 2);

    host.activate(&other).unwrap();
    assert!(host.session().history().is_empty());
    assert_eq!(host.session().status().text, IDLE_TEXT);
    assert_eq!(host.session().status().command, None);

    // Jumps now use the other document's index
    jump(&mut host, "timeout");
    assert_eq!(host.session().cached_index_document(), Some(&other));
}

#[test]
fn test_back_after_state_renamed() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    jump(&mut host, "login");
    jump(&mut host, "timeout");

    // The edit triggers a lens request, which rebuilds the index
    host.replace_line(1, "  sign_in:").unwrap();
    host.click_status().unwrap();

    let render = host.render();
    assert_eq!(render.history, vec!["login".to_string()]);
    assert_eq!(render.status.text, "$(circuit-board) login");
    assert_eq!(
        render.notifications.last().map(String::as_str),
        Some("State 'login' not found.")
    );
}

#[test]
fn test_overlapping_windows_repeat_lenses() {
    let mut host = SimHost::new(&create_default_registry());
    let text = "    transitions:\n      a: one\n    transitions:\n      b: two\n";
    let doc = open(&mut host, "overlap.yaml", text);

    let lines: Vec<usize> = host.lenses(&doc).iter().map(|l| l.range.start.line).collect();
    assert_eq!(lines, vec![1, 3, 3]);
}

#[test]
fn test_window_is_nine_lines() {
    let mut host = SimHost::new(&create_default_registry());
    let mut text = String::from("    transitions:\n");
    for i in 0..12 {
        text.push_str(&format!("      t{}: s{}\n", i, i));
    }
    let doc = open(&mut host, "long.yaml", &text);

    let lenses = host.lenses(&doc);
    assert_eq!(lenses.len(), 9);
    assert_eq!(lenses.last().map(|l| l.range.start.line), Some(9));
}

#[test]
fn test_crlf_document() {
    let mut host = SimHost::new(&create_default_registry());
    let text = "states:\r\n  login:\r\n    transitions:\r\n      next: confirm\r\n  confirm:\r\n# TODO x\r\n";
    let doc = open(&mut host, "crlf.yaml", text);

    assert_eq!(host.lenses(&doc).len(), 1);
    assert_eq!(host.lenses(&doc)[0].command.arguments, vec!["confirm".to_string()]);

    let decorations = host.decorations(&doc);
    assert_eq!(decorations.len(), 1);
    assert_eq!(decorations[0].range.end, TextPosition::new(5, 8));
    assert_eq!(decorations[0].hover, "📝 TODO x");

    host.click_lens(0).unwrap();
    assert_eq!(host.viewport(), Some((4, 4)));
}

#[test]
fn test_non_dialect_documents_get_highlights_only() {
    let mut host = SimHost::new(&create_default_registry());
    let doc = open(&mut host, "notes.md", "FIXME: later\n    transitions:\n      a: b\n");

    assert!(host.lenses(&doc).is_empty());
    assert_eq!(host.decorations(&doc).len(), 1);
    assert_eq!(host.decorations(&doc)[0].class, MarkerClass::Fixme);
}

#[test]
fn test_custom_dialect_language() {
    let mut registry = create_default_registry();
    registry
        .set_override(keys::DIALECT_LANGUAGE, SettingValue::String("oda-dialog".into()))
        .unwrap();
    let mut host = SimHost::new(&registry);

    let yaml = open(&mut host, "flows/login.yaml", LOGIN_FLOW);
    assert!(host.lenses(&yaml).is_empty());

    let dialog = DocumentId::new("flows/login.dialog");
    host.open_document(dialog.clone(), LanguageId::new("oda-dialog"), LOGIN_FLOW);
    assert_eq!(host.lenses(&dialog).len(), 5);
}

#[test]
fn test_custom_highlight_style() {
    let mut registry: SettingsRegistry = create_default_registry();
    registry
        .set_override(
            keys::HIGHLIGHT_TODO_BACKGROUND,
            SettingValue::String("rgba(0,0,255,0.3)".into()),
        )
        .unwrap();
    let mut host = SimHost::new(&registry);
    let doc = open(&mut host, "a.txt", "TODO: blue");

    assert_eq!(host.decorations(&doc)[0].style.background, "rgba(0,0,255,0.3)");
    assert_eq!(host.decorations(&doc)[0].style.ruler_color, "yellow");
}

#[test]
fn test_commands_without_editor() {
    let mut host = SimHost::new(&create_default_registry());
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);
    jump(&mut host, "confirm");
    host.close_active();

    assert_eq!(jump(&mut host, "login"), NavigationOutcome::Unchanged);
    assert_eq!(back(&mut host), NavigationOutcome::Unchanged);
    assert_eq!(host.session().history(), ["confirm"]);
    assert!(host.render().notifications.is_empty());
}

#[test]
fn test_jump_after_edit_in_plaintext_document() {
    let mut host = SimHost::new(&create_default_registry());
    let doc = open(&mut host, "flow.txt", LOGIN_FLOW);
    assert!(host.lenses(&doc).is_empty());

    jump(&mut host, "confirm");
    assert_eq!(host.viewport(), Some((5, 5)));

    // No lens request follows this edit, the jump must still see it
    host.insert_line(0, "# header").unwrap();
    jump(&mut host, "confirm");
    assert_eq!(host.viewport(), Some((6, 6)));
}

#[test]
fn test_jump_after_edit_with_lenses_disabled() {
    let mut registry = create_default_registry();
    registry
        .set_override(keys::LENS_ENABLED, SettingValue::Boolean(false))
        .unwrap();
    let mut host = SimHost::new(&registry);
    open(&mut host, "flows/login.yaml", LOGIN_FLOW);

    jump(&mut host, "timeout");
    host.insert_line(14, "  done:").unwrap();

    let outcome = jump(&mut host, "done");
    assert!(matches!(outcome, NavigationOutcome::Jumped { line: 14, .. }));
}

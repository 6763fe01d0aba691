//! Property-based invariant tests for page overlays.
//!
//! Verifies:
//! 1. Any click sequence leaves at most one context menu displayed, and the
//!    displayed one is the dispatcher's active menu.
//! 2. Any sequence of button clicks, hovers and mousedowns leaves at most one
//!    button styled active, and only its panel visible.
//! 3. Clicking the same button twice always returns the bar to idle.
//! 4. Encoded entity names never contain raw reserved characters.
//! 5. Choosing an operator rewrites only the suffix after the last `__`.

use pagemenu_core::{
    ContextMenuDispatcher, FilterFieldName, MemoryDocument, MenuBarController, MouseButton,
    NodeId, PageMenuConfig, Point, PointerEvent, encode_entity_name,
};
use proptest::prelude::*;

// ── Fixtures ──────────────────────────────────────────────────────────

const ENTITY_CLASSES: [&str; 6] = ["buffer", "resource", "item", "numfilteroper", "menu x", ""];
const MENU_IDS: [&str; 4] = ["buffercontext", "resourcecontext", "itemcontext", "datefilter"];

/// A page with entity cells, their menus and some plain elements.
fn context_page() -> (MemoryDocument, Vec<NodeId>) {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let mut targets = vec![root];
    for (i, class) in ENTITY_CLASSES.iter().enumerate() {
        let cell = doc.element(root, "td");
        doc.with_class(cell, class);
        doc.with_html(cell, &format!("entity &amp; {i}"));
        let inner = doc.element(cell, "b");
        targets.extend([cell, inner]);
    }
    for id in MENU_IDS {
        let menu = doc.element(root, "div");
        doc.with_id(menu, id);
        if id == "datefilter" {
            doc.with_class(menu, "OperatorMenu");
        }
        let link = doc.element(menu, "a");
        doc.with_id(link, "/detail/%s/");
        targets.extend([menu, link]);
    }
    let input = doc.element(root, "input");
    targets.push(input);
    (doc, targets)
}

const BUTTONS: usize = 4;

struct BarPage {
    doc: MemoryDocument,
    buttons: Vec<NodeId>,
    panels: Vec<NodeId>,
    others: Vec<NodeId>,
}

fn bar_page() -> BarPage {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let mut buttons = Vec::new();
    let mut panels = Vec::new();
    let mut others = vec![root];
    for i in 0..BUTTONS {
        let button = doc.element(root, "a");
        doc.with_id(button, &format!("b{i}"));
        doc.with_offset(button, Point::new(i as i32 * 50, 0));
        doc.with_height(button, 20);
        buttons.push(button);
        let panel = doc.element(root, "div");
        doc.with_id(panel, &format!("m{i}"));
        doc.with_class(panel, "menu");
        let entry = doc.element(panel, "a");
        panels.push(panel);
        others.push(entry);
    }
    others.push(doc.element(root, "p"));
    BarPage {
        doc,
        buttons,
        panels,
        others,
    }
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_button() -> impl Strategy<Value = MouseButton> {
    prop_oneof![
        4 => Just(MouseButton::Primary),
        1 => Just(MouseButton::Auxiliary),
        1 => Just(MouseButton::Secondary),
    ]
}

#[derive(Debug, Clone, Copy)]
enum BarOp {
    Click(usize),
    Hover(usize),
    MouseDownOnButton(usize),
    MouseDownElsewhere(usize),
}

fn arb_bar_op() -> impl Strategy<Value = BarOp> {
    prop_oneof![
        (0..BUTTONS).prop_map(BarOp::Click),
        (0..BUTTONS).prop_map(BarOp::Hover),
        (0..BUTTONS).prop_map(BarOp::MouseDownOnButton),
        (0..=BUTTONS + 1).prop_map(BarOp::MouseDownElsewhere),
    ]
}

fn arb_entity_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("&amp;".to_string()),
            Just("&lt;".to_string()),
            Just("&gt;".to_string()),
            Just("&#39;".to_string()),
            Just("&quot;".to_string()),
            any::<char>().prop_map(String::from),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn at_most_one_context_menu(
        clicks in proptest::collection::vec(
            (any::<prop::sample::Index>(), arb_button(), 0i32..800, 0i32..600),
            1..40,
        )
    ) {
        let (mut doc, targets) = context_page();
        let mut ctx = ContextMenuDispatcher::from_config(&PageMenuConfig::default());

        for (target, button, x, y) in clicks {
            let target = targets[target.index(targets.len())];
            let event = PointerEvent::new(target, button, Point::new(x, y));
            let outcome = ctx.on_document_click(&mut doc, &event);

            let displayed = doc.displayed();
            prop_assert!(displayed.len() <= 1);
            prop_assert_eq!(displayed.first(), ctx.active_menu());
            prop_assert_eq!(outcome.is_handled(), ctx.active_menu().is_some());
        }
    }

    #[test]
    fn at_most_one_active_button(ops in proptest::collection::vec(arb_bar_op(), 1..60)) {
        let BarPage { mut doc, buttons, panels, others } = bar_page();
        let mut bar = MenuBarController::from_config(&PageMenuConfig::default(), &doc);

        for op in ops {
            match op {
                BarOp::Click(i) => {
                    bar.on_button_activate(&mut doc, &buttons[i], &format!("m{i}"));
                }
                BarOp::Hover(i) => {
                    bar.on_button_hover(&mut doc, &buttons[i], &format!("m{i}"));
                }
                BarOp::MouseDownOnButton(i) => {
                    bar.on_global_mouse_down(&mut doc, &PointerEvent::primary(buttons[i], 0, 0));
                }
                BarOp::MouseDownElsewhere(i) => {
                    bar.on_global_mouse_down(&mut doc, &PointerEvent::primary(others[i], 0, 0));
                }
            }

            let active = doc.with_class_token("menuButtonActive");
            prop_assert!(active.len() <= 1);
            prop_assert_eq!(active.first(), bar.active_button());

            let expected: Vec<NodeId> = bar
                .active_button()
                .and_then(|b| buttons.iter().position(|x| x == b))
                .map(|i| vec![panels[i]])
                .unwrap_or_default();
            prop_assert_eq!(doc.visible(), expected);
        }
    }

    #[test]
    fn clicking_twice_toggles_off(
        i in 0..BUTTONS,
        warmup in proptest::collection::vec(0..BUTTONS, 0..5),
    ) {
        let BarPage { mut doc, buttons, .. } = bar_page();
        let mut bar = MenuBarController::from_config(&PageMenuConfig::default(), &doc);
        for w in warmup {
            bar.on_button_activate(&mut doc, &buttons[w], &format!("m{w}"));
        }
        if bar.active_button() == Some(&buttons[i]) {
            bar.on_button_activate(&mut doc, &buttons[i], &format!("m{i}"));
        }

        bar.on_button_activate(&mut doc, &buttons[i], &format!("m{i}"));
        prop_assert_eq!(bar.active_button(), Some(&buttons[i]));
        bar.on_button_activate(&mut doc, &buttons[i], &format!("m{i}"));
        prop_assert_eq!(bar.active_button(), None);
        prop_assert!(doc.visible().is_empty());
    }

    #[test]
    fn encoded_names_are_url_safe(text in arb_entity_text()) {
        let encoded = encode_entity_name(&text);
        let bytes = encoded.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'%' {
                prop_assert!(i + 2 < bytes.len(), "truncated escape in {}", encoded);
                prop_assert!(bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit());
                i += 3;
            } else {
                prop_assert!(
                    b.is_ascii_alphanumeric() || b"-_.~".contains(&b),
                    "raw byte {:?} in {}",
                    b as char,
                    encoded
                );
                i += 1;
            }
        }
    }

    #[test]
    fn operator_rewrite_keeps_prefix(
        prefix in "[a-z_]{0,12}(__[a-z]{1,8}){0,2}",
        old in "[a-z]{0,6}",
        op in "[a-z]{1,10}",
    ) {
        let name = format!("{prefix}__{old}");
        let renamed = FilterFieldName::parse(&name).with_operator(&op);
        prop_assert_eq!(renamed, format!("{prefix}__{op}"));
    }
}

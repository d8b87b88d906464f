//! Integration tests for frame rendering: paint order, cascade and theme
//! resolution, fault isolation and pointer interaction.

use std::cell::RefCell;
use std::rc::Rc;

use trellis::{
    BorderColor, Color, DrawCommand, DrawList, Element, ElementId, ElementTree, EngineConfig,
    EventContext, EventKind, Fill, ImageSource, InputState, MouseButton, Point, Shadow, Size, Spacing, Style,
    StyleColor, ThemeRegistry,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Test harness driving whole frames against a recording backend.
struct Frame {
    tree: ElementTree,
    list: DrawList,
    theme: ThemeRegistry,
    root: ElementId,
}

impl Frame {
    fn new(root: Element) -> Self {
        Self::with_config(root, EngineConfig::default())
    }

    fn with_config(root: Element, config: EngineConfig) -> Self {
        let mut tree = ElementTree::with_config(config);
        let root = tree.insert(root).expect("valid tree");
        Self {
            tree,
            list: DrawList::new(),
            theme: ThemeRegistry::new(),
            root,
        }
    }

    /// Render one frame with the pointer off screen.
    fn render(&mut self) {
        self.render_with(InputState::at(Point::new(-1.0, -1.0)));
    }

    fn render_with(&mut self, input: InputState) {
        self.list.begin_frame(input);
        self.tree
            .render(self.root, &mut self.list, &self.theme, Some(Point::ORIGIN));
    }

    fn id(&self, path: &str) -> ElementId {
        self.tree.get(self.root, path).expect("path exists")
    }

    fn fills(&self) -> Vec<Fill> {
        self.list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect()
    }

    fn text_colors(&self) -> Vec<(String, Color)> {
        self.list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, color, .. } => Some((text.clone(), *color)),
                _ => None,
            })
            .collect()
    }
}

fn red() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}

type EventLog = Rc<RefCell<Vec<EventKind>>>;

/// A handler that records the kinds it sees.
fn counter() -> (EventLog, impl FnMut(&mut EventContext<'_>) -> anyhow::Result<()>) {
    let log = EventLog::default();
    let sink = log.clone();
    (log, move |ctx: &mut EventContext<'_>| {
        sink.borrow_mut().push(ctx.kind);
        Ok(())
    })
}

// =========================================================================
// Paint order and cascade
// =========================================================================

#[test]
fn test_paint_order_within_an_element() {
    let style = Style {
        shadow: Some(Shadow {
            size: Spacing::all(4.0),
            color: Color::BLACK.into(),
            offset: Point::new(2.0, 2.0),
        }),
        background_color: Some(Color::WHITE.into()),
        image: Some(ImageSource::Icon(7)),
        border_color: Some(BorderColor::all(red())),
        border_width: Some(Spacing::new(1.0, 0.0, 1.0, 0.0)),
        ..Default::default()
    };
    let mut frame = Frame::new(
        Element::new("card")
            .size(Size::new(100.0, 40.0))
            .text("title")
            .style(style)
            .child(Element::new("body").text("body")),
    );
    frame.render();

    let kinds: Vec<&str> = frame
        .list
        .commands()
        .iter()
        .map(|c| match c {
            DrawCommand::Shadow { .. } => "shadow",
            DrawCommand::FillRect { .. } => "fill",
            DrawCommand::Image { .. } => "image",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Text { .. } => "text",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["shadow", "fill", "image", "line", "line", "text", "text"]);
    assert_eq!(frame.list.texts(), vec!["title", "body"]);
}

#[test]
fn test_text_color_and_font_cascade_to_children() {
    let mut frame = Frame::new(
        Element::new("panel")
            .style(Style {
                text_color: Some(red().into()),
                font_size: Some(28.0),
                ..Default::default()
            })
            .child(Element::new("label").text("ab")),
    );
    frame.render();

    assert_eq!(frame.text_colors(), vec![("ab".to_string(), red())]);
    let label = frame.id("label");
    // Twice the base size measures twice as wide.
    assert_eq!(
        frame.tree.element(label).unwrap().computed_size(),
        Size::new(2.0 * 8.4 * 2.0, 36.0)
    );
}

#[test]
fn test_background_does_not_cascade() {
    let mut frame = Frame::new(
        Element::new("panel")
            .size(Size::new(50.0, 50.0))
            .style(Style {
                background_color: Some(red().into()),
                ..Default::default()
            })
            .child(Element::new("child").size(Size::new(10.0, 10.0))),
    );
    frame.render();
    assert_eq!(frame.fills(), vec![Fill::Solid(red())]);
}

#[test]
fn test_opacity_multiplies_down_the_tree() {
    let mut frame = Frame::new(
        Element::new("panel")
            .size(Size::new(50.0, 50.0))
            .style(Style {
                opacity: Some(0.5),
                ..Default::default()
            })
            .child(Element::new("child").size(Size::new(10.0, 10.0)).style(Style {
                background_color: Some(Color::WHITE.into()),
                opacity: Some(0.5),
                ..Default::default()
            })),
    );
    frame.render();
    assert_eq!(frame.fills(), vec![Fill::Solid(Color::WHITE.with_alpha(0.25))]);
}

#[test]
fn test_font_change_relayouts_text() {
    let mut frame = Frame::new(Element::new("root").child(Element::new("label").text("ab")));
    frame.render();
    let label = frame.id("label");
    assert_eq!(frame.tree.element(label).unwrap().computed_size().height, 18.0);

    frame.tree.element_mut(frame.root).unwrap().style_mut().font_size = Some(28.0);
    frame.render();
    assert_eq!(frame.tree.element(label).unwrap().computed_size().height, 36.0);
}

// =========================================================================
// Theme
// =========================================================================

#[test]
fn test_theme_swap_recolors_and_missing_slot_keeps_last_value() {
    let mut frame = Frame::new(Element::new("window").size(Size::new(10.0, 10.0)).style(Style {
        background_color: Some(StyleColor::themed("Window.Background")),
        ..Default::default()
    }));

    frame.theme.register("Window.Background", Color::BLACK);
    frame.render();
    assert_eq!(frame.fills(), vec![Fill::Solid(Color::BLACK)]);

    frame.theme.register("Window.Background", red());
    frame.render();
    assert_eq!(frame.fills(), vec![Fill::Solid(red())]);

    frame.theme = ThemeRegistry::new();
    frame.theme.register("Something.Else", Color::WHITE);
    frame.render();
    assert_eq!(frame.fills(), vec![Fill::Solid(red())]);
}

// =========================================================================
// Fault isolation
// =========================================================================

#[test]
fn test_failing_draw_call_is_isolated_to_its_element() {
    init_tracing();
    let mut frame = Frame::new(
        Element::new("root")
            .flow(trellis::Flow::Vertical)
            .child(Element::new("broken").text("boom").child(Element::new("inner").text("inner")))
            .child(Element::new("sibling").text("sibling")),
    );
    frame.list.fail_text_containing("boom");
    frame.render();
    assert_eq!(frame.list.texts(), vec!["inner", "sibling"]);
}

#[test]
fn test_failing_render_hook_is_isolated_to_its_element() {
    init_tracing();
    let hook_calls = Rc::new(RefCell::new(0));
    let calls = hook_calls.clone();
    let mut frame = Frame::new(
        Element::new("root")
            .child(
                Element::new("custom")
                    .size(Size::new(20.0, 20.0))
                    .on_render(move |ctx| {
                        *calls.borrow_mut() += 1;
                        ctx.backend.draw_text(
                            ctx.content_box.min,
                            "from hook",
                            ctx.style.font_spec(),
                            Color::WHITE,
                            None,
                        )?;
                        anyhow::bail!("hook exploded")
                    })
                    .child(Element::new("inner").text("inner")),
            )
            .child(Element::new("sibling").text("sibling")),
    );
    frame.render();
    frame.render();

    assert_eq!(*hook_calls.borrow(), 2);
    assert_eq!(frame.list.texts(), vec!["from hook", "inner", "sibling"]);
}

// =========================================================================
// Interaction
// =========================================================================

#[test]
fn test_hover_and_click_edges() {
    let (log, handler) = counter();
    let mut frame = Frame::new(
        Element::new("root").child(
            Element::new("button")
                .size(Size::new(40.0, 20.0))
                .on(EventKind::MouseEnter, |_| Ok(()))
                .on(EventKind::Click, handler),
        ),
    );
    let button = frame.id("button");
    let (log_all, all) = counter();
    let element = frame.tree.element_mut(button).unwrap();
    element.subscribe(EventKind::MouseEnter, all);

    let inside = Point::new(10.0, 10.0);
    frame.render_with(InputState::at(Point::new(100.0, 100.0)));
    frame.render_with(InputState::at(inside));
    assert_eq!(*log_all.borrow(), vec![EventKind::MouseEnter]);
    assert!(frame.tree.element(button).unwrap().is_mouse_over());

    frame.render_with(InputState::at(inside).with_pressed(MouseButton::Left));
    frame.render_with(InputState::at(inside).with_down(MouseButton::Left));
    assert_eq!(*log.borrow(), vec![EventKind::Click]);
    assert!(frame.tree.element(button).unwrap().is_focused());

    frame.render_with(InputState::at(Point::new(100.0, 100.0)));
    assert!(!frame.tree.element(button).unwrap().is_mouse_over());
    assert_eq!(*log_all.borrow(), vec![EventKind::MouseEnter]);
}

#[test]
fn test_right_and_middle_clicks_map_to_their_kinds() {
    let (log, handler) = counter();
    let mut frame = Frame::new(Element::new("button").size(Size::new(40.0, 20.0)));
    let root = frame.root;
    let element = frame.tree.element_mut(root).unwrap();
    element.subscribe(EventKind::MiddleClick, handler);
    let (log_right, right) = counter();
    element.subscribe(EventKind::RightClick, right);

    let inside = Point::new(5.0, 5.0);
    frame.render_with(InputState::at(inside).with_pressed(MouseButton::Middle));
    frame.render_with(InputState::at(inside).with_pressed(MouseButton::Right));
    assert_eq!(*log.borrow(), vec![EventKind::MiddleClick]);
    assert_eq!(*log_right.borrow(), vec![EventKind::RightClick]);
}

#[test]
fn test_nested_interactive_elements_share_one_region() {
    let mut frame = Frame::new(
        Element::new("panel")
            .size(Size::new(100.0, 100.0))
            .on(EventKind::Click, |_| Ok(()))
            .child(Element::new("button").size(Size::new(20.0, 20.0)).on(EventKind::Click, |_| Ok(())))
            .child(Element::new("plain").size(Size::new(20.0, 20.0))),
    );
    frame.render_with(InputState::at(Point::new(5.0, 5.0)));
    assert_eq!(frame.list.region_names(), vec!["panel"]);
    let button = frame.id("button");
    assert!(frame.tree.element(button).unwrap().is_mouse_over());

    frame.render_with(InputState::at(Point::new(50.0, 50.0)));
    assert!(!frame.tree.element(button).unwrap().is_mouse_over());
    assert!(frame.tree.element(frame.root).unwrap().is_mouse_over());
}

#[test]
fn test_sibling_interactive_elements_get_their_own_regions() {
    let mut frame = Frame::new(
        Element::new("bar")
            .child(Element::new("a").size(Size::new(20.0, 20.0)).on(EventKind::Click, |_| Ok(())))
            .child(Element::new("b").size(Size::new(20.0, 20.0)).on(EventKind::Click, |_| Ok(()))),
    );
    frame.render();
    assert_eq!(frame.list.region_names(), vec!["bar.a", "bar.b"]);
}

#[test]
fn test_events_are_delivered_after_the_frame_is_drawn() {
    let mut frame = Frame::new(
        Element::new("button")
            .text("off")
            .on(EventKind::Click, |ctx| {
                if let Some(element) = ctx.tree.element_mut(ctx.target) {
                    element.set_text("on");
                }
                Ok(())
            }),
    );
    frame.render_with(InputState::at(Point::new(2.0, 2.0)).with_pressed(MouseButton::Left));
    assert_eq!(frame.list.texts(), vec!["off"]);

    frame.render();
    assert_eq!(frame.list.texts(), vec!["on"]);
}

#[test]
fn test_hidden_elements_are_neither_drawn_nor_hit() {
    let (log, handler) = counter();
    let mut frame = Frame::new(
        Element::new("root").child(
            Element::new("ghost")
                .size(Size::new(20.0, 20.0))
                .text("ghost")
                .visible(false)
                .on(EventKind::MouseEnter, handler),
        ),
    );
    frame.render_with(InputState::at(Point::new(5.0, 5.0)));
    assert!(frame.list.texts().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_hiding_a_hovered_element_fires_leave_at_once() {
    let (log, handler) = counter();
    let mut frame = Frame::new(
        Element::new("root").child(
            Element::new("button")
                .size(Size::new(40.0, 20.0))
                .on(EventKind::MouseEnter, |_| Ok(()))
                .on(EventKind::MouseLeave, |_| Ok(())),
        ),
    );
    let button = frame.id("button");
    let element = frame.tree.element_mut(button).unwrap();
    element.subscribe(EventKind::MouseEnter, handler);
    let (leaves, on_leave) = counter();
    element.subscribe(EventKind::MouseLeave, on_leave);

    let inside = InputState::at(Point::new(5.0, 5.0)).with_pressed(MouseButton::Left);
    frame.render_with(inside);
    assert!(frame.tree.element(button).unwrap().is_mouse_over());
    assert!(frame.tree.element(button).unwrap().is_focused());

    frame.tree.element_mut(button).unwrap().set_visible(false);
    frame.render();
    assert!(!frame.tree.element(button).unwrap().is_mouse_over());
    assert!(!frame.tree.element(button).unwrap().is_focused());
    assert_eq!(*leaves.borrow(), vec![EventKind::MouseLeave]);

    frame.render();
    frame.tree.element_mut(button).unwrap().set_visible(true);
    frame.render();
    assert_eq!(*log.borrow(), vec![EventKind::MouseEnter]);
    assert_eq!(*leaves.borrow(), vec![EventKind::MouseLeave]);
}

#[test]
fn test_hiding_a_parent_releases_hovered_descendants() {
    let (leaves, on_leave) = counter();
    let mut frame = Frame::new(
        Element::new("root").child(
            Element::new("toolbar").child(
                Element::new("button")
                    .size(Size::new(40.0, 20.0))
                    .on(EventKind::MouseLeave, on_leave),
            ),
        ),
    );
    let toolbar = frame.id("toolbar");
    let button = frame.id("toolbar.button");

    frame.render_with(InputState::at(Point::new(5.0, 5.0)));
    assert!(frame.tree.element(button).unwrap().is_mouse_over());

    frame.tree.element_mut(toolbar).unwrap().set_visible(false);
    frame.render_with(InputState::at(Point::new(5.0, 5.0)));
    assert!(!frame.tree.element(button).unwrap().is_mouse_over());
    assert_eq!(*leaves.borrow(), vec![EventKind::MouseLeave]);
}

#[test]
fn test_losing_pointer_subscribers_clears_hover() {
    let mut frame = Frame::new(Element::new("root").child(Element::new("button").size(Size::new(40.0, 20.0))));
    let button = frame.id("button");
    let subscription = frame
        .tree
        .element_mut(button)
        .unwrap()
        .subscribe(EventKind::Click, |_| Ok(()));

    let inside = InputState::at(Point::new(5.0, 5.0));
    frame.render_with(inside);
    assert!(frame.tree.element(button).unwrap().is_mouse_over());

    assert!(frame.tree.element_mut(button).unwrap().unsubscribe(subscription));
    frame.render_with(inside);
    assert!(!frame.tree.element(button).unwrap().is_mouse_over());
    assert!(frame.list.region_names().is_empty());
}

// =========================================================================
// Debug overlay and redraw without layout
// =========================================================================

#[test]
fn test_debug_overlay_outlines_every_element() {
    let config = EngineConfig::from_json(r#"{ "debug": { "enabled": true, "labels": false } }"#).unwrap();
    let mut frame = Frame::with_config(
        Element::new("root")
            .padding(Spacing::all(4.0))
            .child(Element::new("a").size(Size::new(10.0, 10.0))),
        config,
    );
    frame.render();
    let strokes = frame
        .list
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
        .count();
    // Root has padding, so its content box is outlined too.
    assert_eq!(strokes, 3);
}

#[test]
fn test_render_without_position_reuses_last_layout() {
    let mut frame = Frame::new(Element::new("root").child(Element::new("label").text("ab")));
    frame.render();

    let label = frame.id("label");
    frame.tree.element_mut(label).unwrap().set_text("abcd");
    frame.list.begin_frame(InputState::default());
    frame.tree.render(frame.root, &mut frame.list, &frame.theme, None);

    assert_eq!(frame.list.texts(), vec!["abcd"]);
    // Boxes are from the previous layout.
    assert_eq!(frame.tree.element(label).unwrap().computed_size().width, 2.0 * 8.4);
    assert!(frame.tree.element(label).unwrap().is_dirty());
}

//! Style cascade.
//!
//! Which properties propagate from parent to child, and how, is a table of
//! [`CascadeRule`]s rather than code: [`Style::cascade_with`] walks the
//! table and applies each rule's [`Combine`] policy.

use super::{FontId, Style, StyleColor, ThemeRegistry};
use crate::layout::Anchor;
use crate::tree::{ElementId, ElementTree};

/// A property that can take part in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProperty {
    TextColor,
    BackgroundBorderColor,
    TextAlign,
    Font,
    FontSize,
    OutlineColor,
    OutlineWidth,
    Opacity,
}

/// How a child's value combines with its parent's computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// Take the parent's value when the child leaves it unset.
    Inherit,
    /// Multiply when both are set, otherwise take whichever is set.
    Multiply,
}

/// One row of the cascade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeRule {
    pub property: StyleProperty,
    pub combine: Combine,
}

impl CascadeRule {
    pub const fn inherit(property: StyleProperty) -> Self {
        Self {
            property,
            combine: Combine::Inherit,
        }
    }

    pub const fn multiply(property: StyleProperty) -> Self {
        Self {
            property,
            combine: Combine::Multiply,
        }
    }
}

/// The cascade used by the element tree. Properties not listed here never
/// propagate.
pub const CASCADE_RULES: &[CascadeRule] = &[
    CascadeRule::inherit(StyleProperty::TextColor),
    CascadeRule::inherit(StyleProperty::BackgroundBorderColor),
    CascadeRule::inherit(StyleProperty::TextAlign),
    CascadeRule::inherit(StyleProperty::Font),
    CascadeRule::inherit(StyleProperty::FontSize),
    CascadeRule::inherit(StyleProperty::OutlineColor),
    CascadeRule::inherit(StyleProperty::OutlineWidth),
    CascadeRule::multiply(StyleProperty::Opacity),
];

/// Values that know how to combine under [`Combine::Multiply`].
///
/// Non-numeric values keep the child's value.
trait Cascadable: Clone {
    fn multiply(&self, _parent: &Self) -> Self {
        self.clone()
    }
}

impl Cascadable for f32 {
    fn multiply(&self, parent: &Self) -> Self {
        self * parent
    }
}

impl Cascadable for StyleColor {}
impl Cascadable for Anchor {}
impl Cascadable for FontId {}

fn combine<T: Cascadable>(child: &mut Option<T>, parent: &Option<T>, policy: Combine) {
    let Some(parent) = parent else {
        return;
    };
    match child {
        None => *child = Some(parent.clone()),
        Some(own) if policy == Combine::Multiply => *own = own.multiply(parent),
        Some(_) => {}
    }
}

impl Style {
    /// Merge with the parent's computed style using [`CASCADE_RULES`].
    pub fn cascade(&self, parent: Option<&Style>) -> Style {
        self.cascade_with(parent, CASCADE_RULES)
    }

    /// Merge with the parent's computed style using an explicit rule table.
    pub fn cascade_with(&self, parent: Option<&Style>, rules: &[CascadeRule]) -> Style {
        let mut computed = self.clone();
        let Some(parent) = parent else {
            return computed;
        };

        for rule in rules {
            let policy = rule.combine;
            match rule.property {
                StyleProperty::TextColor => {
                    combine(&mut computed.text_color, &parent.text_color, policy)
                }
                StyleProperty::BackgroundBorderColor => combine(
                    &mut computed.background_border_color,
                    &parent.background_border_color,
                    policy,
                ),
                StyleProperty::TextAlign => {
                    combine(&mut computed.text_align, &parent.text_align, policy)
                }
                StyleProperty::Font => combine(&mut computed.font, &parent.font, policy),
                StyleProperty::FontSize => {
                    combine(&mut computed.font_size, &parent.font_size, policy)
                }
                StyleProperty::OutlineColor => {
                    combine(&mut computed.outline_color, &parent.outline_color, policy)
                }
                StyleProperty::OutlineWidth => {
                    combine(&mut computed.outline_width, &parent.outline_width, policy)
                }
                StyleProperty::Opacity => combine(&mut computed.opacity, &parent.opacity, policy),
            }
        }

        computed
    }
}

impl ElementTree {
    /// Resolve theme slots and cascade computed styles top-down from `id`.
    ///
    /// A root cascades from the config's base style; any other element
    /// from its parent's current computed style. Text elements whose font
    /// or font size changed are marked dirty.
    pub fn compute_style(&mut self, id: ElementId, theme: &ThemeRegistry) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let parent_style = match node.parent.and_then(|parent| self.nodes.get(parent)) {
            Some(parent) => parent.computed_style.clone(),
            None => self.config.base_style(),
        };
        self.cascade_element(id, &parent_style, theme);
    }

    fn cascade_element(&mut self, id: ElementId, parent: &Style, theme: &ThemeRegistry) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        theme.resolve_style(&mut node.style);
        let computed = node.style.cascade(Some(parent));
        if node.text.is_some() && computed.text_metrics_differ(&node.computed_style) {
            node.dirty = true;
        }
        node.computed_style = computed;

        let style = node.computed_style.clone();
        let children = node.children.clone();
        for child in children {
            self.cascade_element(child, &style, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Color;

    fn red() -> StyleColor {
        Color::rgb(1.0, 0.0, 0.0).into()
    }

    fn blue() -> StyleColor {
        Color::rgb(0.0, 0.0, 1.0).into()
    }

    #[test]
    fn unset_inheritable_comes_from_parent() {
        let parent = Style {
            text_color: Some(red()),
            font: Some(FontId(2)),
            ..Default::default()
        };
        let computed = Style::default().cascade(Some(&parent));
        assert_eq!(computed.text_color, Some(red()));
        assert_eq!(computed.font, Some(FontId(2)));
    }

    #[test]
    fn own_value_wins_over_parent() {
        let parent = Style {
            text_color: Some(red()),
            ..Default::default()
        };
        let child = Style {
            text_color: Some(blue()),
            ..Default::default()
        };
        assert_eq!(child.cascade(Some(&parent)).text_color, Some(blue()));
    }

    #[test]
    fn non_inheritable_never_propagates() {
        let parent = Style {
            background_color: Some(red()),
            background_rounding: Some(4.0),
            image_grayscale: Some(true),
            ..Default::default()
        };
        let computed = Style::default().cascade(Some(&parent));
        assert_eq!(computed.background_color, None);
        assert_eq!(computed.background_rounding, None);
        assert_eq!(computed.image_grayscale, None);
    }

    #[test]
    fn opacity_multiplies_when_both_set() {
        let parent = Style {
            opacity: Some(0.5),
            ..Default::default()
        };
        let child = Style {
            opacity: Some(0.5),
            ..Default::default()
        };
        assert_eq!(child.cascade(Some(&parent)).opacity, Some(0.25));
        assert_eq!(Style::default().cascade(Some(&parent)).opacity, Some(0.5));
        assert_eq!(child.cascade(None).opacity, Some(0.5));
    }

    #[test]
    fn custom_rule_table_is_respected() {
        let parent = Style {
            text_color: Some(red()),
            font: Some(FontId(1)),
            ..Default::default()
        };
        let rules = [CascadeRule::inherit(StyleProperty::Font)];
        let computed = Style::default().cascade_with(Some(&parent), &rules);
        assert_eq!(computed.font, Some(FontId(1)));
        assert_eq!(computed.text_color, None);
    }

    #[test]
    fn tree_cascade_starts_from_base_style() {
        use crate::tree::Element;

        let mut tree = ElementTree::new();
        let root = tree
            .insert(
                Element::new("root")
                    .style(Style {
                        font_size: Some(20.0),
                        ..Default::default()
                    })
                    .child(Element::new("label").text("hi")),
            )
            .unwrap();
        let label = tree.get(root, "label").unwrap();
        tree.compute_style(root, &ThemeRegistry::new());

        let computed = tree.element(label).unwrap().computed_style();
        assert_eq!(computed.font_size, Some(20.0));
        assert_eq!(computed.font, Some(FontId(0)));
        assert_eq!(computed.text_color.as_ref().map(StyleColor::value), Some(Color::WHITE));
    }

    #[test]
    fn font_change_marks_text_dirty() {
        use crate::tree::Element;

        let mut tree = ElementTree::new();
        let root = tree.insert(Element::new("label").text("hi")).unwrap();
        let theme = ThemeRegistry::new();
        tree.compute_style(root, &theme);
        tree.element_mut(root).unwrap().dirty = false;

        tree.compute_style(root, &theme);
        assert!(!tree.element(root).unwrap().is_dirty());

        tree.element_mut(root).unwrap().style_mut().font_size = Some(30.0);
        tree.compute_style(root, &theme);
        assert!(tree.element(root).unwrap().is_dirty());
    }
}

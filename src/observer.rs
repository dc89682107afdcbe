use super::*;
use window::{LayoutBox, WindowState};

/// `rootMargin` offsets in CSS order. Negative values shrink the root.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct RootMargin {
    pub(crate) top: f64,
    pub(crate) right: f64,
    pub(crate) bottom: f64,
    pub(crate) left: f64,
}

impl RootMargin {
    /// Parses the 1 to 4 value shorthand, e.g. `"0px 0px -50px 0px"`.
    pub(crate) fn parse(src: &str) -> Result<Self> {
        let values = src
            .split_whitespace()
            .map(parse_px)
            .collect::<Result<Vec<_>>>()?;
        let margin = match values.as_slice() {
            [all] => Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            },
            [vertical, horizontal] => Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            },
            [top, horizontal, bottom] => Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            },
            [top, right, bottom, left] => Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            },
            _ => {
                return Err(Error::Config(format!(
                    "root margin needs 1 to 4 values: {src:?}"
                )));
            }
        };
        Ok(margin)
    }
}

fn parse_px(token: &str) -> Result<f64> {
    let (number, has_unit) = match token.strip_suffix("px") {
        Some(number) => (number, true),
        None => (token, false),
    };
    // Unitless values are only valid for zero.
    match number.parse::<f64>().ok().filter(|v| v.is_finite()) {
        Some(value) if has_unit || value == 0.0 => Ok(value),
        _ => Err(Error::Config(format!(
            "unsupported root margin value: {token:?}"
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObserverOptions {
    pub(crate) threshold: f64,
    pub(crate) root_margin: RootMargin,
}

/// Visible share of `layout` inside the vertical span `[view_top, view_bottom]`,
/// or `None` when the two do not touch.
pub(crate) fn intersection_ratio(
    layout: LayoutBox,
    view_top: f64,
    view_bottom: f64,
) -> Option<f64> {
    if view_bottom < view_top {
        return None;
    }
    if layout.height == 0.0 {
        return (layout.top >= view_top && layout.top <= view_bottom).then_some(1.0);
    }
    let overlap = layout.bottom().min(view_bottom) - layout.top.max(view_top);
    if overlap < 0.0 {
        return None;
    }
    Some((overlap / layout.height).clamp(0.0, 1.0))
}

#[derive(Debug, Clone)]
struct Observer<O> {
    owner: O,
    options: ObserverOptions,
    targets: Vec<NodeId>,
}

/// Intersection observers keyed by the behavior that owns them.
#[derive(Debug, Clone)]
pub(crate) struct ObserverRegistry<O> {
    observers: Vec<Observer<O>>,
}

impl<O> Default for ObserverRegistry<O> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<O: Copy + PartialEq> ObserverRegistry<O> {
    pub(crate) fn create(&mut self, owner: O, options: ObserverOptions) {
        self.observers.push(Observer {
            owner,
            options,
            targets: Vec::new(),
        });
    }

    pub(crate) fn observe(&mut self, owner: O, target: NodeId) {
        if let Some(observer) = self.observers.iter_mut().find(|o| o.owner == owner) {
            if !observer.targets.contains(&target) {
                observer.targets.push(target);
            }
        }
    }

    pub(crate) fn unobserve(&mut self, owner: O, target: NodeId) {
        if let Some(observer) = self.observers.iter_mut().find(|o| o.owner == owner) {
            observer.targets.retain(|node| *node != target);
        }
    }

    pub(crate) fn is_observing(&self, owner: O, target: NodeId) -> bool {
        self.observers
            .iter()
            .any(|o| o.owner == owner && o.targets.contains(&target))
    }

    /// Targets currently intersecting at or above their observer's threshold,
    /// in observer creation order then observation order.
    pub(crate) fn intersecting_entries(&self, window: &WindowState) -> Vec<(O, NodeId)> {
        let mut out = Vec::new();
        for observer in &self.observers {
            let margin = observer.options.root_margin;
            let view_top = window.scroll_y - margin.top;
            let view_bottom = window.scroll_y + window.inner_height + margin.bottom;
            for target in &observer.targets {
                let Some(ratio) = window
                    .layout(*target)
                    .and_then(|layout| intersection_ratio(layout, view_top, view_bottom))
                else {
                    continue;
                };
                if ratio >= observer.options.threshold {
                    out.push((observer.owner, *target));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_parses_shorthand_forms() -> Result<()> {
        let margin = RootMargin::parse("0px 0px -50px 0px")?;
        assert_eq!(margin.bottom, -50.0);
        assert_eq!(margin.top, 0.0);
        assert_eq!(RootMargin::parse("10px")?.left, 10.0);
        let two = RootMargin::parse("5px 0")?;
        assert_eq!((two.top, two.bottom, two.left), (5.0, 5.0, 0.0));
        assert!(RootMargin::parse("").is_err());
        assert!(RootMargin::parse("10%").is_err());
        assert!(RootMargin::parse("1px 2px 3px 4px 5px").is_err());
        Ok(())
    }

    #[test]
    fn ratio_reflects_visible_share() {
        let layout = LayoutBox::new(900.0, 200.0);
        assert_eq!(intersection_ratio(layout, 0.0, 1000.0), Some(0.5));
        assert_eq!(intersection_ratio(layout, 0.0, 800.0), None);
        assert_eq!(intersection_ratio(layout, 0.0, 900.0), Some(0.0));
        assert_eq!(intersection_ratio(layout, 900.0, 1900.0), Some(1.0));
    }

    #[test]
    fn zero_height_targets_intersect_when_inside_root() {
        let layout = LayoutBox::new(100.0, 0.0);
        assert_eq!(intersection_ratio(layout, 0.0, 800.0), Some(1.0));
        assert_eq!(intersection_ratio(layout, 200.0, 800.0), None);
    }

    #[test]
    fn bottom_margin_shrinks_the_root() -> Result<()> {
        let mut dom = html::parse_html("<section id='s'></section>")?;
        let section = dom.by_id("s").expect("section");
        let mut window = WindowState::new(800.0);
        window.set_layout(section, LayoutBox::new(760.0, 100.0));

        let mut registry = ObserverRegistry::default();
        registry.create(
            "reveal",
            ObserverOptions {
                threshold: 0.1,
                root_margin: RootMargin::parse("0px 0px -50px 0px")?,
            },
        );
        registry.observe("reveal", section);
        // Root ends at 750, section starts at 760.
        assert!(registry.intersecting_entries(&window).is_empty());

        window.scroll_y = 100.0;
        assert_eq!(registry.intersecting_entries(&window), vec![("reveal", section)]);

        let unplaced = dom.create_detached_element("section");
        registry.observe("reveal", unplaced);
        assert_eq!(registry.intersecting_entries(&window), vec![("reveal", section)]);

        registry.unobserve("reveal", section);
        assert!(!registry.is_observing("reveal", section));
        assert!(registry.intersecting_entries(&window).is_empty());
        Ok(())
    }
}

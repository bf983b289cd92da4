//! Style accessors.
//!
//! Application styling is either a constant or a function. Function
//! accessors for the base geometry layer may also depend on whether the
//! feature is selected and on the current mode; composing them with a
//! [`SelectionContext`] produces a plain per-feature [`LayerAccessor`] that
//! the rendering host can evaluate without knowing about selection.

use geoedit_core::{EditHandle, Feature, FeatureCollection, Mode, is_feature_selected};
use std::fmt;
use std::sync::Arc;

pub type FeatureFn<T> = Arc<dyn Fn(&Feature) -> T + Send + Sync>;
pub type SelectionFn<T> = Arc<dyn Fn(&Feature, bool, Mode) -> T + Send + Sync>;
pub type TentativeFn<T> = Arc<dyn Fn(&Feature, Option<&Feature>, Mode) -> T + Send + Sync>;

// ─── Layer accessors ─────────────────────────────────────────────────────

/// A resolved accessor handed to the rendering host: a constant, or a
/// function of one datum (a feature or an edit handle).
pub enum LayerAccessor<D: ?Sized, T> {
    Constant(T),
    Function(Arc<dyn Fn(&D) -> T + Send + Sync>),
}

/// Accessor over edit handles.
pub type HandleAccessor<T> = LayerAccessor<EditHandle, T>;

impl<D: ?Sized, T: Clone> LayerAccessor<D, T> {
    pub fn function(f: impl Fn(&D) -> T + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    /// Evaluate for one datum.
    pub fn get(&self, datum: &D) -> T {
        match self {
            Self::Constant(v) => v.clone(),
            Self::Function(f) => f(datum),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl<D: ?Sized, T: Clone> Clone for LayerAccessor<D, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(v) => Self::Constant(v.clone()),
            Self::Function(f) => Self::Function(Arc::clone(f)),
        }
    }
}

impl<D: ?Sized, T: fmt::Debug> fmt::Debug for LayerAccessor<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

// ─── Base-layer accessors ────────────────────────────────────────────────

/// Accessor for the base geometry layer as configured by the application.
#[derive(Clone)]
pub enum Accessor<T> {
    Constant(T),
    /// Depends on the feature only.
    Feature(FeatureFn<T>),
    /// Depends on the feature, its selection state and the mode.
    SelectionAware(SelectionFn<T>),
}

impl<T> Accessor<T> {
    pub fn feature(f: impl Fn(&Feature) -> T + Send + Sync + 'static) -> Self {
        Self::Feature(Arc::new(f))
    }

    pub fn selection_aware(f: impl Fn(&Feature, bool, Mode) -> T + Send + Sync + 'static) -> Self {
        Self::SelectionAware(Arc::new(f))
    }
}

impl<T: fmt::Debug> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Feature(_) => f.write_str("Feature(..)"),
            Self::SelectionAware(_) => f.write_str("SelectionAware(..)"),
        }
    }
}

/// Everything a selection-aware accessor needs besides the feature.
#[derive(Debug, Clone)]
pub struct SelectionContext {
    pub data: Arc<FeatureCollection>,
    pub selected_feature_indexes: Option<Arc<[usize]>>,
    pub mode: Mode,
}

impl SelectionContext {
    pub fn is_selected(&self, feature: &Feature) -> bool {
        is_feature_selected(
            Some(self.data.as_ref()),
            self.selected_feature_indexes.as_deref(),
            feature,
        )
    }
}

/// Resolve an application accessor against the current selection.
///
/// Constants pass through unchanged. Selection-aware functions are wrapped
/// so every call computes the feature's selection state against `ctx`.
pub fn compose_selection_aware<T>(accessor: &Accessor<T>, ctx: &SelectionContext) -> LayerAccessor<Feature, T>
where
    T: Clone + 'static,
{
    match accessor {
        Accessor::Constant(v) => LayerAccessor::Constant(v.clone()),
        Accessor::Feature(f) => {
            let f = Arc::clone(f);
            LayerAccessor::Function(Arc::new(move |feature: &Feature| f(feature)))
        }
        Accessor::SelectionAware(f) => {
            let f = Arc::clone(f);
            let ctx = ctx.clone();
            LayerAccessor::Function(Arc::new(move |feature: &Feature| {
                f(feature, ctx.is_selected(feature), ctx.mode)
            }))
        }
    }
}

// ─── Tentative-layer accessors ───────────────────────────────────────────

/// Accessor for the tentative (in-progress) feature. Functions receive the
/// tentative feature, the first selected feature and the mode.
#[derive(Clone)]
pub enum TentativeAccessor<T> {
    Constant(T),
    Function(TentativeFn<T>),
}

impl<T> TentativeAccessor<T> {
    pub fn function(f: impl Fn(&Feature, Option<&Feature>, Mode) -> T + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }
}

impl<T: fmt::Debug> fmt::Debug for TentativeAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

pub fn compose_tentative<T>(
    accessor: &TentativeAccessor<T>,
    first_selected: Option<Arc<Feature>>,
    mode: Mode,
) -> LayerAccessor<Feature, T>
where
    T: Clone + 'static,
{
    match accessor {
        TentativeAccessor::Constant(v) => LayerAccessor::Constant(v.clone()),
        TentativeAccessor::Function(f) => {
            let f = Arc::clone(f);
            LayerAccessor::Function(Arc::new(move |feature: &Feature| {
                f(feature, first_selected.as_deref(), mode)
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoedit_core::{Geometry, Position};
    use pretty_assertions::assert_eq;

    fn ctx(indexes: Option<&[usize]>, mode: Mode) -> SelectionContext {
        let data = FeatureCollection::new(
            (0..3).map(|i| Feature::new(Geometry::Point(Position::new(i as f64, 0.0)))),
        );
        SelectionContext {
            data: Arc::new(data),
            selected_feature_indexes: indexes.map(Arc::from),
            mode,
        }
    }

    #[test]
    fn constant_passes_through() {
        let composed = compose_selection_aware(&Accessor::Constant(4.0_f32), &ctx(Some(&[0][..]), Mode::Modify));
        assert!(composed.is_constant());
        let c = ctx(None, Mode::Modify);
        assert_eq!(composed.get(&c.data.features[0]), 4.0);
    }

    #[test]
    fn selection_state_reaches_function() {
        let c = ctx(Some(&[1][..]), Mode::Modify);
        let accessor = Accessor::selection_aware(|_f: &Feature, selected, mode| (selected, mode));
        let composed = compose_selection_aware(&accessor, &c);

        assert_eq!(composed.get(&c.data.features[0]), (false, Mode::Modify));
        assert_eq!(composed.get(&c.data.features[1]), (true, Mode::Modify));
    }

    #[test]
    fn empty_selection_is_never_selected() {
        for indexes in [None, Some(&[][..])] {
            let c = ctx(indexes, Mode::View);
            let composed = compose_selection_aware(&Accessor::selection_aware(|_: &Feature, s, _| s), &c);
            assert!(c.data.features.iter().all(|f| !composed.get(f)));
        }
    }

    #[test]
    fn tentative_function_sees_first_selected() {
        let c = ctx(Some(&[2][..]), Mode::DrawPolygon);
        let first = Some(Arc::clone(&c.data.features[2]));
        let accessor = TentativeAccessor::function(|_f: &Feature, sel: Option<&Feature>, mode| {
            (sel.map(|s| s.geometry.clone()), mode)
        });
        let composed = compose_tentative(&accessor, first, c.mode);
        let (geometry, mode) = composed.get(&c.data.features[0]);
        assert_eq!(geometry, Some(Geometry::Point(Position::new(2.0, 0.0))));
        assert_eq!(mode, Mode::DrawPolygon);
    }
}

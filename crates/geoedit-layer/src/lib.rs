pub mod accessor;
pub mod controller;
pub mod cursor;
pub mod engine;
pub mod input;
pub mod layers;
pub mod pick;
pub mod settings;

pub use accessor::{Accessor, HandleAccessor, LayerAccessor, SelectionContext, TentativeAccessor};
pub use controller::{ControllerState, DragGesture, Effects, InteractionController, OnEdit, SourceEvent};
pub use cursor::{Cursor, resolve_cursor};
pub use engine::{FeatureEditingEngine, PointerMoveOutcome};
pub use input::{ClickEvent, DragEvent, PointerEvent, PointerMoveEvent};
pub use layers::{LayerDescriptor, compose_layers};
pub use pick::{Pick, PickedObject, annotate_pick, picked_edit_handle};
pub use settings::{EditHandleKind, LayerProps, LayerSettings, LayerStyle};

// Re-export the data model so hosts only need this crate
pub use geoedit_core;

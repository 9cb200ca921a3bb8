//! Interactive viewport engine
//!
//! Everything in here is pure and windowing-agnostic: the app layer feeds it
//! raw pointer input and reads back a [`ViewState`] to draw from.

pub mod controller;
pub mod hit;
pub mod layer;
pub mod reducer;
pub mod settings;
pub mod state;
pub mod transform;

pub use controller::{ViewportController, ViewportInput};
pub use hit::{PointEntity, PolygonEntity};
pub use layer::{EntityLayer, ProvinceId, ProvinceMap, StarField, StarId};
pub use reducer::{Transition, ViewEvent, ViewSignal, reduce};
pub use settings::ViewportSettings;
pub use state::{DragAnchor, ViewState};
pub use transform::{ScreenRect, TransformParams};

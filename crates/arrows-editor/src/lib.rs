pub mod commands;
pub mod config;
pub mod drag_to_create;
pub mod editor;
pub mod gesture;
pub mod handles;
pub mod input;
pub mod interceptors;
pub mod marquee;
pub mod mutation;
pub mod tools;

pub use commands::CommandStack;
pub use config::{ConfigError, EditorConfig};
pub use drag_to_create::DragToCreate;
pub use editor::Editor;
pub use gesture::{DragType, Gesture, GestureContext, GestureMachine, MouseState};
pub use handles::{Corner, HandleLock, TransformationHandles};
pub use input::{InterceptedEvent, Modifiers, PointerEvent};
pub use interceptors::{EventHandler, EventHandlers, HandlerContext, HandlerId};
pub use marquee::Marquee;
pub use mutation::{GraphMutation, Mutation, NodePosition, SelectionMutation};
pub use tools::{ApplicationLayout, DrawToolMode, ToolMutation};

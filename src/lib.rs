//! Turn-based battle resolution engine.
//!
//! The crate resolves battles between two sides of creature parties:
//! damage flows through an ordered, extensible pipeline; everything a
//! move, ability, or item does is expressed as actions on a queue; and a
//! flow state machine drives whole turns from selection to judgement.
//! Content (species, moves) lives in the `schema` crate and the built-in
//! catalog; hosts supply decisions through `ActionProvider` and watch
//! resolution through `BattleObserver`.

pub mod battle;
pub mod catalog;
pub mod config;
pub mod creature;
pub mod errors;
pub mod observer;
pub mod provider;
pub mod rng;

pub use battle::actions::{Action, ChosenAction, SideCondition};
pub use battle::arbiter::{judge, Outcome};
pub use battle::damage::{DamageContext, DamagePipeline, DamageStep};
pub use battle::executor::Executor;
pub use battle::field::{Field, SideId, SlotRef};
pub use battle::flow::{BattleFlow, BattlePhase};
pub use battle::handlers::Trigger;
pub use battle::validation::{validate_field, Violation};
pub use config::BattleConfig;
pub use creature::{CreatureInst, MoveInstance, StatusCondition};
pub use errors::{ActionError, CatalogError, FlowError};
pub use observer::{ActionLog, BattleObserver, TraceObserver};
pub use provider::{ActionProvider, FirstMoveProvider, ScriptedProvider};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};

//! Execute handlers for the Inception Bridge contract

pub mod admin;
pub mod config;
pub mod deposit;
pub mod registry;
pub mod withdraw;

pub use admin::{execute_accept_owner, execute_cancel_owner_proposal, execute_propose_owner};
pub use config::{
    execute_pause, execute_set_lockbox, execute_set_long_cap, execute_set_long_cap_duration,
    execute_set_notary, execute_set_short_cap, execute_set_short_cap_duration, execute_unpause,
};
pub use deposit::execute_receive;
pub use registry::{
    execute_add_bridge, execute_add_destination, execute_remove_bridge,
    execute_remove_destination,
};
pub use withdraw::execute_withdraw;

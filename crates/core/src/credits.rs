//! Credit-balance constants.

/// Credits granted to every account at registration.
pub const STARTING_CREDITS: i32 = 100;

/// Credits consumed by one successful generation call.
pub const GENERATION_COST: i32 = 1;

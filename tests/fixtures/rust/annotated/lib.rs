//! service:name Inventory
//! description:Tracks stock levels
//! system:warehouse

/// service:uses Redis
/// technology:redis
/// proto:resp
pub struct Cache;

/*
 * service:requests Pricing
 * proto:grpc
 */
pub fn quote() {}

// ordinary comment
pub fn main_loop() {}

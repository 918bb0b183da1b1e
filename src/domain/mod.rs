// Domain layer: cart model and the ports (collaborator interfaces) the store depends on.

pub mod model;
pub mod ports;

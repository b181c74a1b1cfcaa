// handlers/admin/mod.rs - Admin handlers (x-admin-key required)
//
// Every route here is mounted behind `middleware::require_admin_key`, so a
// handler only runs once the shared secret has matched.
pub mod productos;

// Re-export handler functions for use in routing
pub use productos::create as productos_create;
pub use productos::delete as productos_delete;
pub use productos::list as productos_list;
pub use productos::update as productos_update;

// handlers/mod.rs - Route handlers grouped by access tier
//
// Public (no auth) → Admin (x-admin-key shared secret)
pub mod admin; // /admin/* - catalog management, behind the admin key gate
pub mod public; // /api/etiquetas and /health - open to label devices and probes

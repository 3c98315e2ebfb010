pub mod context;
pub mod store;
pub mod supabase;

pub use context::SessionContext;
pub use store::{Table, TableQuery, TableStore};
pub use supabase::SupabaseClient;

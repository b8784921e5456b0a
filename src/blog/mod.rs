/*!
 * Blog posts and their storage.
 *
 * - `model`: post and translation variant types
 * - `store`: JSON-file-backed post store
 */

pub use self::model::{Post, Translation};
pub use self::store::{JsonPostStore, PostStore, generate_id};

pub mod model;
pub mod store;

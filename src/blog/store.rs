/*!
 * JSON-file-backed post store.
 *
 * Every operation reads the whole posts file and every mutation rewrites it.
 * There is no locking: the last writer wins.
 */

use chrono::Utc;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::file_utils::FileManager;
use super::model::Post;

/// Storage operations the rest of the application relies on
pub trait PostStore {
    /// Every post, newest first
    fn get_all_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Look up a post by id
    fn get_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.get_all_posts()?.into_iter().find(|p| p.id == id))
    }

    /// Insert or update a post, assigning an id and timestamps
    fn save_post(&self, post: Post) -> Result<Post, StoreError>;

    /// Remove a post; removing an unknown id is not an error
    fn delete_post(&self, id: &str) -> Result<(), StoreError>;

    /// Filter posts by a free-text query and/or an available language
    fn search_posts(&self, query: Option<&str>, lang: Option<&str>) -> Result<Vec<Post>, StoreError> {
        let query = query.filter(|q| !q.is_empty());
        let posts = self.get_all_posts()?;

        if query.is_none() && lang.is_none() {
            return Ok(posts);
        }

        Ok(posts
            .into_iter()
            .filter(|post| lang.is_none_or(|l| post.translations.contains_key(l)))
            .filter(|post| query.is_none_or(|q| post.matches_query(q)))
            .collect())
    }
}

/// Generate a new post id: `post_<unix millis>_<9 random characters>`
pub fn generate_id() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("post_{}_{}", Utc::now().timestamp_millis(), &random[..9])
}

/// Post store persisted as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonPostStore {
    path: PathBuf,
}

impl JsonPostStore {
    /// Create a store over the given file; the file is not touched until used
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the backing file with `posts`
    pub fn save_all(&self, posts: &[Post]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(posts)?;
        FileManager::write_atomic(&self.path, &json)?;
        debug!("Wrote {} posts to {:?}", posts.len(), self.path);
        Ok(())
    }
}

impl PostStore for JsonPostStore {
    fn get_all_posts(&self) -> Result<Vec<Post>, StoreError> {
        if !FileManager::file_exists(&self.path) {
            warn!("Post file {:?} not found, returning empty list", self.path);
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str::<Vec<Post>>(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save_post(&self, mut post: Post) -> Result<Post, StoreError> {
        let mut posts = self.get_all_posts()?;

        if post.id.is_empty() {
            post.id = generate_id();
        }

        let now = Utc::now();
        post.created_at = post.created_at.or(Some(now));
        post.updated_at = Some(now);

        match posts.iter().position(|p| p.id == post.id) {
            Some(index) => posts[index] = post.clone(),
            None => posts.insert(0, post.clone()),
        }

        self.save_all(&posts)?;
        info!("Saved post {}", post.id);

        Ok(post)
    }

    fn delete_post(&self, id: &str) -> Result<(), StoreError> {
        let mut posts = self.get_all_posts()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            debug!("Delete of unknown post {} ignored", id);
            return Ok(());
        }

        self.save_all(&posts)?;
        info!("Deleted post {}", id);
        Ok(())
    }
}

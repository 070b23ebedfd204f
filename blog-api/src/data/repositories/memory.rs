use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::data::repository::{CommentRepository, PostRepository, Repository, require_id};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::resource::{Entity, not_found};

/// One table: rows ordered by id plus the id sequence.
#[derive(Debug)]
struct Table<E> {
    rows: BTreeMap<i64, E>,
    last_id: i64,
}

impl<E: Entity> Table<E> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn all(&self) -> Vec<E> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: i64) -> Option<E> {
        self.rows.get(&id).cloned()
    }

    fn save(&mut self, mut entity: E) -> Result<E, DomainError> {
        match entity.id() {
            Some(id) => {
                let row = self.rows.get_mut(&id).ok_or_else(|| not_found::<E>(id))?;
                *row = entity.clone();
            }
            None => {
                self.last_id += 1;
                entity.set_id(Some(self.last_id));
                self.rows.insert(self.last_id, entity.clone());
            }
        }
        Ok(entity)
    }

    fn remove(&mut self, id: i64) -> Option<E> {
        self.rows.remove(&id)
    }
}

#[derive(Debug)]
struct Tables {
    posts: Table<Post>,
    comments: Table<Comment>,
}

/// Process-local store holding posts and comments.
///
/// Mirrors the relational schema: a comment must point at an existing post
/// and removing a post removes its comments.
#[derive(Debug, Clone)]
pub(crate) struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                posts: Table::new(),
                comments: Table::new(),
            })),
        }
    }

    pub(crate) fn posts(&self) -> MemoryPostRepository {
        MemoryPostRepository {
            store: self.clone(),
        }
    }

    pub(crate) fn comments(&self) -> MemoryCommentRepository {
        MemoryCommentRepository {
            store: self.clone(),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables
            .read()
            .map_err(|_| DomainError::Unexpected("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables
            .write()
            .map_err(|_| DomainError::Unexpected("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryPostRepository {
    store: MemoryStore,
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryCommentRepository {
    store: MemoryStore,
}

#[async_trait]
impl Repository<Post> for MemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.store.read()?.posts.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.store.read()?.posts.get(id))
    }

    async fn save(&self, entity: Post) -> Result<Post, DomainError> {
        self.store.write()?.posts.save(entity)
    }

    async fn delete(&self, entity: Post) -> Result<(), DomainError> {
        let id = require_id(&entity)?;
        let mut tables = self.store.write()?;
        tables.posts.remove(id);
        tables.comments.rows.retain(|_, comment| comment.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn find_by_blog(&self, blog: &str) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self
            .store
            .read()?
            .posts
            .rows
            .values()
            .filter(|post| post.blog == blog)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn all_tags(&self, blog: &str) -> Result<Vec<String>, DomainError> {
        let tables = self.store.read()?;
        let tags: BTreeSet<String> = tables
            .posts
            .rows
            .values()
            .filter(|post| post.blog == blog)
            .flat_map(|post| post.tags.iter().cloned())
            .collect();
        Ok(tags.into_iter().collect())
    }
}

#[async_trait]
impl Repository<Comment> for MemoryCommentRepository {
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        Ok(self.store.read()?.comments.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        Ok(self.store.read()?.comments.get(id))
    }

    async fn save(&self, entity: Comment) -> Result<Comment, DomainError> {
        let mut tables = self.store.write()?;
        if !tables.posts.rows.contains_key(&entity.post_id) {
            return Err(not_found::<Post>(entity.post_id));
        }
        tables.comments.save(entity)
    }

    async fn delete(&self, entity: Comment) -> Result<(), DomainError> {
        let id = require_id(&entity)?;
        self.store.write()?.comments.remove(id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .store
            .read()?
            .comments
            .rows
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }
}

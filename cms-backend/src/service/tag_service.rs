// src/service/tag_service.rs

use crate::api::dto::common::PaginationMeta;
use crate::api::dto::post_dto::PostDto;
use crate::api::dto::tag_dto::{
    CreateTagDto, DeleteTagResponseDto, PaginatedTagsDto, TagDto, TagFilterDto, TagWithPostsDto,
    UpdateTagDto,
};
use crate::db::DbPool;
use crate::domain::tag_model;
use crate::error::{AppError, AppResult};
use crate::repository::post_repository::PostRepository;
use crate::repository::tag_repository::TagRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct TagService {
    repo: Arc<TagRepository>,
    post_repo: Arc<PostRepository>,
}

impl TagService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(TagRepository::new(db_pool.clone())),
            post_repo: Arc::new(PostRepository::new(db_pool)),
        }
    }

    /// タグ一覧を記事数つきで新しい順に取得する
    pub async fn list_tags(&self, filter: &TagFilterDto) -> AppResult<PaginatedTagsDto> {
        let (tags, total_items) = self.repo.find_with_filter(filter).await?;
        let counts = self.post_count_map().await?;

        let per_page = std::cmp::min(filter.per_page.unwrap_or(50), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);

        let items = tags
            .into_iter()
            .map(|tag| {
                let count = counts.get(&tag.id).copied().unwrap_or(0);
                TagDto::from_model(tag, count)
            })
            .collect();

        Ok(PaginatedTagsDto {
            items,
            pagination: PaginationMeta::new(page, per_page, total_items),
        })
    }

    pub async fn get_tag(&self, id: Uuid) -> AppResult<TagWithPostsDto> {
        let tag = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        self.build_tag_with_posts(tag).await
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> AppResult<TagWithPostsDto> {
        let tag = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        self.build_tag_with_posts(tag).await
    }

    pub async fn create_tag(&self, payload: &CreateTagDto) -> AppResult<TagDto> {
        // スラッグの重複は事前にチェックして409を返す
        if self
            .repo
            .find_by_slug_excluding(&payload.slug, None)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Tag with this slug already exists".to_string(),
            ));
        }

        let created = self.repo.create(payload).await?;
        info!(tag_id = %created.id, slug = %created.slug, "Tag created");

        Ok(TagDto::from_model(created, 0))
    }

    pub async fn update_tag(&self, id: Uuid, payload: &UpdateTagDto) -> AppResult<TagDto> {
        // スラッグを変更する場合は自分以外との重複をチェックする
        if let Some(slug) = &payload.slug {
            if self
                .repo
                .find_by_slug_excluding(slug, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::Conflict(
                    "Tag with this slug already exists".to_string(),
                ));
            }
        }

        let updated = self
            .repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        let counts = self.post_count_map().await?;
        let count = counts.get(&updated.id).copied().unwrap_or(0);

        Ok(TagDto::from_model(updated, count))
    }

    /// タグを削除し、解除された記事関連の数を返す
    pub async fn delete_tag(&self, id: Uuid) -> AppResult<DeleteTagResponseDto> {
        let tag = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        let counts = self.post_count_map().await?;
        let released_post_count = counts.get(&tag.id).copied().unwrap_or(0);

        self.repo.delete(id).await?;
        info!(tag_id = %id, released_post_count, "Tag deleted");

        Ok(DeleteTagResponseDto {
            success: true,
            released_post_count,
        })
    }

    /// 公開済み記事数の多い順の人気タグ
    pub async fn popular_tags(&self, limit: u64) -> AppResult<Vec<TagDto>> {
        let tallies = self.repo.popular_tag_counts(limit).await?;
        let ids: Vec<Uuid> = tallies.iter().map(|t| t.tag_id).collect();
        let tags: HashMap<Uuid, tag_model::Model> = self
            .repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|tag| (tag.id, tag))
            .collect();

        // 集計順（公開記事数の降順）を保ったままDTOに変換する
        Ok(tallies
            .into_iter()
            .filter_map(|tally| {
                tags.get(&tally.tag_id)
                    .cloned()
                    .map(|tag| TagDto::from_model(tag, tally.count))
            })
            .collect())
    }

    async fn build_tag_with_posts(&self, tag: tag_model::Model) -> AppResult<TagWithPostsDto> {
        let posts = self.post_repo.find_published_for_tag(tag.id).await?;
        let authors = self.post_repo.load_authors(&posts).await?;
        let categories = self.post_repo.load_categories(&posts).await?;

        let counts = self.post_count_map().await?;
        let post_count = counts.get(&tag.id).copied().unwrap_or(0);

        let posts = posts
            .into_iter()
            .zip(authors)
            .zip(categories)
            .map(|((post, author), categories)| {
                let mut dto = PostDto::from(post);
                dto.author = author.map(Into::into);
                dto.categories = Some(categories.into_iter().map(Into::into).collect());
                dto
            })
            .collect();

        Ok(TagWithPostsDto::from_model(tag, posts, post_count))
    }

    async fn post_count_map(&self) -> AppResult<HashMap<Uuid, i64>> {
        Ok(self
            .repo
            .post_counts()
            .await?
            .into_iter()
            .map(|c| (c.tag_id, c.count))
            .collect())
    }
}

//! File record repository for database operations.
//!
//! Implements the core metadata store trait using `SeaORM`.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::files;
use filedock_core::metadata::{ContentKind, FileRecord, MetadataError, MetadataStore, RecordPatch};
use filedock_shared::FileId;

/// Relational metadata store implementation.
#[derive(Debug, Clone)]
pub struct FileRecordRepository {
    db: DatabaseConnection,
}

impl FileRecordRepository {
    /// Create a new file record repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MetadataStore for FileRecordRepository {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, record: FileRecord) -> Result<FileRecord, MetadataError> {
        let existing = files::Entity::find_by_id(record.file_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| MetadataError::read(e.to_string()))?;

        if existing.is_some() {
            return Err(MetadataError::Duplicate(record.file_id));
        }

        let model = to_active(&record)
            .insert(&self.db)
            .await
            .map_err(|e| MetadataError::write(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn get(&self, id: FileId) -> Result<FileRecord, MetadataError> {
        let model = files::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| MetadataError::read(e.to_string()))?;

        model.map(to_domain).ok_or(MetadataError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, MetadataError> {
        let models = files::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| MetadataError::read(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn update(&self, id: FileId, patch: RecordPatch) -> Result<FileRecord, MetadataError> {
        let model = files::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| MetadataError::read(e.to_string()))?
            .ok_or(MetadataError::NotFound(id))?;

        let mut record = to_domain(model);
        patch.apply(&mut record);

        let model = to_active(&record)
            .update(&self.db)
            .await
            .map_err(|e| MetadataError::write(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn rename(&self, id: FileId, new_id: FileId) -> Result<FileRecord, MetadataError> {
        let existing = files::Entity::find_by_id(new_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| MetadataError::read(e.to_string()))?;

        if existing.is_some() {
            return Err(MetadataError::Duplicate(new_id));
        }

        let result = files::Entity::update_many()
            .col_expr(files::Column::FileId, Expr::value(new_id.into_inner()))
            .col_expr(files::Column::ModifiedAt, Expr::value(Utc::now()))
            .filter(files::Column::FileId.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(|e| MetadataError::write(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(MetadataError::NotFound(id));
        }

        self.get(new_id).await
    }

    async fn delete(&self, id: FileId) -> Result<(), MetadataError> {
        let result = files::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| MetadataError::write(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(MetadataError::NotFound(id));
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, MetadataError> {
        let result = files::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| MetadataError::write(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn count(&self) -> Result<u64, MetadataError> {
        files::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| MetadataError::read(e.to_string()))
    }

    async fn check_connection(&self) -> Result<(), MetadataError> {
        self.db
            .ping()
            .await
            .map_err(|e| MetadataError::connection(e.to_string()))
    }
}

/// Convert database model to domain record.
fn to_domain(model: files::Model) -> FileRecord {
    FileRecord {
        file_id: FileId::from_uuid(model.file_id),
        name: model.name,
        content_kind: ContentKind::parse(&model.content_kind).unwrap_or_default(),
        size: model.size,
        created_at: model.created_at.with_timezone(&Utc),
        modified_at: model.modified_at.with_timezone(&Utc),
    }
}

/// Convert domain record to an active model with every column set.
fn to_active(record: &FileRecord) -> files::ActiveModel {
    files::ActiveModel {
        file_id: Set(record.file_id.into_inner()),
        name: Set(record.name.clone()),
        content_kind: Set(record.content_kind.as_str().to_string()),
        size: Set(record.size),
        created_at: Set(record.created_at.into()),
        modified_at: Set(record.modified_at.into()),
    }
}

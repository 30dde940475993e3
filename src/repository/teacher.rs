use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use thiserror::Error;

use crate::domain::teacher::{
    ActiveStatus, ParseActiveStatusError, Teacher, TeacherDomainError, TeachingClass,
    TeachingClassError,
};

#[derive(Debug, Error)]
pub enum TeacherRepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("teacher domain error: {0}")]
    Teacher(#[from] TeacherDomainError),
    #[error("teaching class domain error: {0}")]
    Class(#[from] TeachingClassError),
    #[error("invalid active status column: {0}")]
    Status(#[from] ParseActiveStatusError),
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub active_status: ActiveStatus,
}

#[derive(Debug, Clone)]
pub struct NewTeachingClass {
    pub teacher_id: i64,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub registered_at: DateTime<Utc>,
    pub recruitment_start_at: DateTime<Utc>,
    pub recruitment_end_at: DateTime<Utc>,
}

/// Listing row for class search results. The recruitment window is not part
/// of the listing projection.
#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassSort {
    /// registered_at descending
    Latest,
    /// price ascending
    Price,
}

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ClassSearchParams {
    pub teacher_id: i64,
    pub title_keyword: Option<String>,
    pub sort: Option<ClassSort>,
    pub page: Option<PageRequest>,
}

#[derive(Debug, Clone)]
pub struct ClassPage {
    pub records: Vec<ClassRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl ClassPage {
    pub fn of(records: Vec<ClassRecord>, page: Option<PageRequest>, total: u64) -> Self {
        let page_number = page.map(|p| p.page).unwrap_or(0);
        let page_size = page
            .map(|p| p.size)
            .unwrap_or(records.len() as u32);
        let total_pages = if page_size > 0 {
            ((total + page_size as u64 - 1) / page_size as u64) as u32
        } else {
            1
        };
        Self {
            records,
            page: page_number,
            page_size,
            total,
            total_pages,
        }
    }
}

#[async_trait]
pub trait TeacherRepository {
    async fn create_teacher(
        &self,
        new_teacher: NewTeacher,
    ) -> Result<Teacher, TeacherRepositoryError>;

    /// Load the teacher aggregate including its classes, ordered by id.
    async fn find_by_id(&self, teacher_id: i64) -> Result<Option<Teacher>, TeacherRepositoryError>;

    async fn add_class(
        &self,
        new_class: NewTeachingClass,
    ) -> Result<TeachingClass, TeacherRepositoryError>;

    /// Dynamic class listing: keyword filter, optional sort, optional paging.
    async fn search_classes(
        &self,
        params: ClassSearchParams,
    ) -> Result<ClassPage, TeacherRepositoryError>;
}

#[derive(Clone)]
pub struct MySqlTeacherRepository {
    pool: MySqlPool,
}

impl MySqlTeacherRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn map_class_row(row: &MySqlRow) -> Result<TeachingClass, TeacherRepositoryError> {
        Ok(TeachingClass::new(
            Some(row.try_get("id")?),
            row.try_get("teacher_id")?,
            row.try_get::<String, _>("title")?,
            row.try_get::<String, _>("description")?,
            row.try_get("price")?,
            row.try_get::<DateTime<Utc>, _>("registered_at")?,
            row.try_get::<DateTime<Utc>, _>("recruitment_start_at")?,
            row.try_get::<DateTime<Utc>, _>("recruitment_end_at")?,
        )?)
    }

    fn map_record_row(row: &MySqlRow) -> Result<ClassRecord, TeacherRepositoryError> {
        Ok(ClassRecord {
            id: row.try_get("id")?,
            teacher_id: row.try_get("teacher_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            registered_at: row.try_get("registered_at")?,
        })
    }

    fn keyword_filter(params: &ClassSearchParams) -> Option<&str> {
        params
            .title_keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }
}

#[async_trait]
impl TeacherRepository for MySqlTeacherRepository {
    async fn create_teacher(
        &self,
        new_teacher: NewTeacher,
    ) -> Result<Teacher, TeacherRepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO teachers (name, active_status)
            VALUES (?, ?)
            "#,
        )
        .bind(&new_teacher.name)
        .bind(new_teacher.active_status.as_str())
        .execute(&self.pool)
        .await?;

        let teacher = Teacher::new(
            result.last_insert_id() as i64,
            new_teacher.name,
            new_teacher.active_status,
            Vec::new(),
        )?;
        Ok(teacher)
    }

    async fn find_by_id(
        &self,
        teacher_id: i64,
    ) -> Result<Option<Teacher>, TeacherRepositoryError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT id, name, active_status
            FROM teachers
            WHERE id = ?
            "#,
        )
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = maybe_row else {
            return Ok(None);
        };

        let class_rows = sqlx::query(
            r#"
            SELECT id, teacher_id, title, description, price,
                   registered_at, recruitment_start_at, recruitment_end_at
            FROM teaching_classes
            WHERE teacher_id = ?
            ORDER BY id
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        let mut classes = Vec::with_capacity(class_rows.len());
        for class_row in &class_rows {
            classes.push(Self::map_class_row(class_row)?);
        }

        let active_status: ActiveStatus =
            row.try_get::<String, _>("active_status")?.parse()?;
        let teacher = Teacher::new(
            row.try_get("id")?,
            row.try_get::<String, _>("name")?,
            active_status,
            classes,
        )?;
        Ok(Some(teacher))
    }

    async fn add_class(
        &self,
        new_class: NewTeachingClass,
    ) -> Result<TeachingClass, TeacherRepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO teaching_classes
                (teacher_id, title, description, price,
                 registered_at, recruitment_start_at, recruitment_end_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new_class.teacher_id)
        .bind(&new_class.title)
        .bind(&new_class.description)
        .bind(new_class.price)
        .bind(new_class.registered_at)
        .bind(new_class.recruitment_start_at)
        .bind(new_class.recruitment_end_at)
        .execute(&self.pool)
        .await?;

        let class = TeachingClass::new(
            Some(result.last_insert_id() as i64),
            new_class.teacher_id,
            new_class.title,
            new_class.description,
            new_class.price,
            new_class.registered_at,
            new_class.recruitment_start_at,
            new_class.recruitment_end_at,
        )?;
        Ok(class)
    }

    async fn search_classes(
        &self,
        params: ClassSearchParams,
    ) -> Result<ClassPage, TeacherRepositoryError> {
        let keyword = Self::keyword_filter(&params);

        let mut where_clause = String::from("WHERE teacher_id = ?");
        if keyword.is_some() {
            where_clause.push_str(" AND title LIKE CONCAT('%', ?, '%')");
        }

        let count_sql = format!("SELECT COUNT(*) AS total FROM teaching_classes {where_clause}");
        let mut count_query = sqlx::query(&count_sql).bind(params.teacher_id);
        if let Some(keyword) = keyword {
            count_query = count_query.bind(keyword);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.try_get("total")?;

        let mut select_sql = format!(
            "SELECT id, teacher_id, title, description, price, registered_at \
             FROM teaching_classes {where_clause}"
        );
        match params.sort {
            Some(ClassSort::Latest) => select_sql.push_str(" ORDER BY registered_at DESC"),
            Some(ClassSort::Price) => select_sql.push_str(" ORDER BY price ASC"),
            None => {}
        }
        if params.page.is_some() {
            select_sql.push_str(" LIMIT ? OFFSET ?");
        }

        let mut select_query = sqlx::query(&select_sql).bind(params.teacher_id);
        if let Some(keyword) = keyword {
            select_query = select_query.bind(keyword);
        }
        if let Some(page) = params.page {
            select_query = select_query
                .bind(page.size as i64)
                .bind(page.page as i64 * page.size as i64);
        }

        let rows = select_query.fetch_all(&self.pool).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(Self::map_record_row(row)?);
        }

        Ok(ClassPage::of(records, params.page, total as u64))
    }
}

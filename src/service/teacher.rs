use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use validator::{Validate, ValidationErrors};

use crate::domain::teacher::{ActiveStatus, ClassPolicy, ClassPolicyError, TeachingClass};
use crate::dto::teacher::{
    ClassMetadata, ClassRegistered, ClassSearchQuery, RegisterClassRequest,
    RegisterTeacherRequest, RegisterTeacherResult, SortType,
};
use crate::repository::teacher::{
    ClassRecord, ClassSearchParams, ClassSort, NewTeacher, NewTeachingClass, PageRequest,
    TeacherRepository, TeacherRepositoryError,
};
use crate::util::error::{BusinessError, InternalError, TeacherError, ValidationField};
use crate::util::response::{PagedData, Pagination};
use crate::util::validation::validate_name;
use crate::util::AppError;

pub struct TeacherService<R: TeacherRepository + Send + Sync + 'static> {
    repository: Arc<R>,
}

impl<R> TeacherService<R>
where
    R: TeacherRepository + Send + Sync + 'static,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, payload))]
    pub async fn register_teacher(
        &self,
        payload: RegisterTeacherRequest,
    ) -> Result<RegisterTeacherResult, AppError> {
        payload
            .validate()
            .map_err(|err| AppError::from(BusinessError::Validation(validation_errors(err))))?;
        let name = validate_name(&payload.name).map_err(|err| {
            AppError::from(BusinessError::Validation(vec![ValidationField {
                field: "name".into(),
                message: err.to_string(),
            }]))
        })?;

        let teacher = self
            .repository
            .create_teacher(NewTeacher {
                name,
                active_status: ActiveStatus::Active,
            })
            .await
            .map_err(map_repository_error)?;

        Ok(RegisterTeacherResult {
            teacher_id: teacher.id,
        })
    }

    #[instrument(skip(self, payload), fields(teacher_id = teacher_id))]
    pub async fn register_class(
        &self,
        teacher_id: i64,
        payload: RegisterClassRequest,
    ) -> Result<ClassRegistered, AppError> {
        payload
            .validate()
            .map_err(|err| AppError::from(BusinessError::Validation(validation_errors(err))))?;

        let mut teacher = self
            .repository
            .find_by_id(teacher_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| AppError::from(BusinessError::Teacher(TeacherError::NotFound)))?;

        let registered_at = payload.registered_at.unwrap_or_else(Utc::now);
        ClassPolicy::validate(&teacher, &payload.title, registered_at)
            .map_err(map_policy_error)?;

        let teaching_class = TeachingClass::new(
            None,
            teacher_id,
            payload.title.clone(),
            payload.description.clone(),
            payload.price,
            registered_at,
            payload.recruitment_start_at,
            payload.recruitment_end_at,
        )
        .map_err(|err| {
            AppError::from(BusinessError::Validation(vec![ValidationField {
                field: "class".into(),
                message: err.to_string(),
            }]))
        })?;

        // 애그리거트 한도는 정책과 별개로 한 번 더 지켜진다
        teacher
            .register_class(teaching_class)
            .map_err(|_| AppError::from(BusinessError::Teacher(TeacherError::ClassLimitExceeded)))?;

        let saved = self
            .repository
            .add_class(NewTeachingClass {
                teacher_id,
                title: payload.title,
                description: payload.description,
                price: payload.price,
                registered_at,
                recruitment_start_at: payload.recruitment_start_at,
                recruitment_end_at: payload.recruitment_end_at,
            })
            .await
            .map_err(map_repository_error)?;

        let class_id = saved
            .id
            .ok_or_else(|| AppError::from(InternalError::Unknown))?;
        Ok(ClassRegistered { class_id })
    }

    #[instrument(skip(self, query), fields(teacher_id = teacher_id))]
    pub async fn classes(
        &self,
        teacher_id: i64,
        query: ClassSearchQuery,
    ) -> Result<PagedData<ClassMetadata>, AppError> {
        query
            .validate()
            .map_err(|err| AppError::from(BusinessError::Validation(validation_errors(err))))?;

        self.repository
            .find_by_id(teacher_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| AppError::from(BusinessError::Teacher(TeacherError::NotFound)))?;

        let page = query.size.map(|size| PageRequest {
            page: query.page.unwrap_or(0),
            size,
        });
        let params = ClassSearchParams {
            teacher_id,
            title_keyword: query.title_keyword,
            sort: query.sort.map(|sort| match sort {
                SortType::Latest => ClassSort::Latest,
                SortType::Price => ClassSort::Price,
            }),
            page,
        };

        let class_page = self
            .repository
            .search_classes(params)
            .await
            .map_err(map_repository_error)?;

        Ok(PagedData {
            items: class_page.records.into_iter().map(to_metadata).collect(),
            pagination: Pagination {
                page: class_page.page,
                page_size: class_page.page_size,
                total: class_page.total,
                total_pages: class_page.total_pages,
            },
        })
    }
}

fn to_metadata(record: ClassRecord) -> ClassMetadata {
    ClassMetadata {
        id: record.id,
        teacher_id: record.teacher_id,
        title: record.title,
        description: record.description,
        price: record.price,
        registered_at: record.registered_at,
    }
}

pub(crate) fn map_repository_error(err: TeacherRepositoryError) -> AppError {
    match err {
        TeacherRepositoryError::Database(_) => AppError::from(InternalError::Unknown),
        TeacherRepositoryError::Teacher(_)
        | TeacherRepositoryError::Class(_)
        | TeacherRepositoryError::Status(_) => AppError::from(InternalError::Unknown),
    }
}

fn map_policy_error(err: ClassPolicyError) -> AppError {
    let teacher_error = match err {
        ClassPolicyError::InactiveTeacher => TeacherError::Inactive,
        ClassPolicyError::ClassLimitExceeded(_) => TeacherError::ClassLimitExceeded,
        ClassPolicyError::TitleTooShort(_) => TeacherError::TitleTooShort,
        ClassPolicyError::TitleTooLong(_) => TeacherError::TitleTooLong,
        ClassPolicyError::RegistrationHourNotAllowed(_) => TeacherError::RegistrationHourNotAllowed,
    };
    AppError::from(BusinessError::Teacher(teacher_error))
}

pub(crate) fn validation_errors(err: ValidationErrors) -> Vec<ValidationField> {
    let mut fields = Vec::new();
    for (field, errors) in err.field_errors() {
        for error in errors {
            let message = error.message.clone().unwrap_or_else(|| "잘못된 값입니다".into());
            fields.push(ValidationField {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
    }
    fields
}

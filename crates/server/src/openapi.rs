use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Create/update body. Every score must lie in `0..=100`.
#[derive(ToSchema)]
pub struct StudentInputDoc {
    #[schema(example = "홍길동")]
    pub name: String,
    #[schema(minimum = 0, maximum = 100, example = 85)]
    pub korean: i64,
    #[schema(minimum = 0, maximum = 100, example = 90)]
    pub english: i64,
    #[schema(minimum = 0, maximum = 100, example = 80)]
    pub math: i64,
    #[schema(minimum = 0, maximum = 100, example = 75)]
    pub science: i64,
}

#[derive(ToSchema)]
pub struct StudentRecordDoc {
    pub name: String,
    pub korean: u8,
    pub english: u8,
    pub math: u8,
    pub science: u8,
}

#[derive(ToSchema)]
pub struct DerivedScoreDoc {
    #[schema(example = "정약용")]
    pub name: String,
    pub korean: u8,
    pub english: u8,
    pub math: u8,
    pub science: u8,
    #[schema(example = 330)]
    pub total: u32,
    #[schema(example = 82.5)]
    pub average: f64,
}

#[derive(ToSchema)]
pub struct RosterStatisticsDoc {
    pub total_students: usize,
    pub average_korean: f64,
    pub average_english: f64,
    pub average_math: f64,
    pub average_science: f64,
    pub overall_average: f64,
    pub top_student: String,
}

#[derive(ToSchema)]
pub struct DeleteResponseDoc {
    pub message: String,
    pub deleted_student: StudentRecordDoc,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub detail: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::root::root,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::create_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
        crate::routes::statistics::get_statistics,
    ),
    components(
        schemas(
            HealthResponse,
            StudentInputDoc,
            StudentRecordDoc,
            DerivedScoreDoc,
            RosterStatisticsDoc,
            DeleteResponseDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "기본"),
        (name = "학생 관리"),
        (name = "통계")
    )
)]
pub struct ApiDoc;

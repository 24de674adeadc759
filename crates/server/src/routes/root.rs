use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EndpointMap {
    #[serde(rename = "전체 학생 목록")]
    pub students: &'static str,
    #[serde(rename = "학생 조회")]
    pub student: &'static str,
    #[serde(rename = "통계 정보")]
    pub statistics: &'static str,
}

/// Service banner returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub docs: &'static str,
    pub endpoints: EndpointMap,
}

pub static BANNER: Banner = Banner {
    message: "학생 점수 관리 API에 오신 것을 환영합니다!",
    docs: "/docs",
    endpoints: EndpointMap {
        students: "/students",
        student: "/students/{name}",
        statistics: "/statistics",
    },
};

#[utoipa::path(get, path = "/", tag = "기본", responses((status = 200, description = "Service banner and endpoint map")))]
pub async fn root() -> Json<&'static Banner> {
    Json(&BANNER)
}

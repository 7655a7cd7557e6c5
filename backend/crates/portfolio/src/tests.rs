//! Unit tests for Portfolio crate

#[cfg(test)]
mod error_tests {
    use crate::error::PortfolioError;
    use kernel::error::{app_error::AppError, code::ErrorCode};
    use kernel::id::ProjectId;
    use kernel::validation::FieldErrors;

    #[test]
    fn test_not_found_message() {
        let err = AppError::from(PortfolioError::project_not_found(ProjectId::new(7)));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), ErrorCode::ResourceNotFound);
        assert_eq!(err.message(), "Project not found with id: 7");
    }

    #[test]
    fn test_owner_missing_is_not_found() {
        let err = AppError::from(PortfolioError::OwnerProfileMissing);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.code(), ErrorCode::ResourceNotFound);
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let err = AppError::from(PortfolioError::duplicate_project_title("P1"));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.code(), ErrorCode::DuplicateResource);
        assert_eq!(err.message(), "Project already exists with title: P1");

        let err = AppError::from(PortfolioError::duplicate_skill_name("Rust"));
        assert_eq!(err.message(), "Skill already exists with name: Rust");
    }

    #[test]
    fn test_invalid_parameter_is_type_mismatch() {
        let err = AppError::from(PortfolioError::InvalidParameter {
            parameter: "category",
            value: "mobile".to_string(),
        });
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.message(), "Invalid value 'mobile' for parameter 'category'");
    }

    #[test]
    fn test_validation_keeps_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("title", "title is required");
        let err = AppError::from(PortfolioError::from(errors));
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(
            err.validation_errors().unwrap().get("title"),
            Some("title is required")
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::from(PortfolioError::Internal("bad row".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_ne!(err.public_message(), "bad row");
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::value_objects::{ProjectStatus, SkillCategory, SkillLevel};
    use crate::presentation::dto::*;

    #[test]
    fn test_create_project_defaults() {
        let req: CreateProjectRequest = serde_json::from_str(r#"{"title":"P1"}"#).unwrap();
        let project = req.into_new_project().unwrap();
        assert_eq!(project.title, "P1");
        assert!(!project.is_featured);
        assert_eq!(project.display_order, 0);
        assert_eq!(project.status, ProjectStatus::Completed);
        assert!(project.gallery.is_empty());
        assert!(project.technologies.is_none());
    }

    #[test]
    fn test_create_project_requires_title() {
        let req: CreateProjectRequest = serde_json::from_str(r#"{"title":"   "}"#).unwrap();
        let errors = req.into_new_project().unwrap_err();
        assert_eq!(errors.get("title"), Some("title is required"));
    }

    #[test]
    fn test_create_project_reports_every_field() {
        let body = serde_json::json!({
            "title": "x".repeat(256),
            "status": "paused",
            "review_url": "u".repeat(501),
        });
        let req: CreateProjectRequest = serde_json::from_value(body).unwrap();
        let errors = req.into_new_project().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.get("status"),
            Some("status must be one of: completed, in_progress, archived")
        );
    }

    #[test]
    fn test_create_project_keeps_structured_description() {
        let body = serde_json::json!({
            "title": "P1",
            "status": "IN_PROGRESS",
            "full_description": {
                "overview": "text",
                "features": ["a", "b"],
                "meta": { "year": 2024, "open_source": true }
            },
            "technologies": ["Rust", "PostgreSQL"],
            "project_date": "2024-05-01"
        });
        let req: CreateProjectRequest = serde_json::from_value(body.clone()).unwrap();
        let project = req.into_new_project().unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(
            serde_json::Value::Object(project.full_description.unwrap()),
            body["full_description"]
        );
        assert_eq!(project.project_date.unwrap().to_string(), "2024-05-01");
    }

    #[test]
    fn test_update_project_empty_body_is_empty_patch() {
        let req: UpdateProjectRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.into_patch().unwrap(), Default::default());
    }

    #[test]
    fn test_update_project_rejects_blank_title() {
        let req: UpdateProjectRequest = serde_json::from_str(r#"{"title":""}"#).unwrap();
        let errors = req.into_patch().unwrap_err();
        assert_eq!(errors.get("title"), Some("title must not be blank"));
    }

    #[test]
    fn test_full_description_must_be_object() {
        let result =
            serde_json::from_str::<CreateProjectRequest>(r#"{"title":"P1","full_description":[1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_skill_parses_enums_case_insensitively() {
        let req: CreateSkillRequest =
            serde_json::from_str(r#"{"name":"Rust","category":"backend","level":"High"}"#)
                .unwrap();
        let skill = req.into_new_skill().unwrap();
        assert_eq!(skill.category, SkillCategory::Backend);
        assert_eq!(skill.level, SkillLevel::High);
        assert_eq!(skill.priority, 0);
    }

    #[test]
    fn test_create_skill_validation() {
        let req: CreateSkillRequest =
            serde_json::from_str(r#"{"category":"mobile","priority":-1}"#).unwrap();
        let errors = req.into_new_skill().unwrap_err();
        assert_eq!(errors.get("name"), Some("name is required"));
        assert_eq!(errors.get("level"), Some("level is required"));
        assert!(errors.get("category").unwrap().starts_with("category must be one of"));
        assert!(errors.get("priority").is_some());
    }

    #[test]
    fn test_update_skill_partial() {
        let req: UpdateSkillRequest = serde_json::from_str(r#"{"level":"low"}"#).unwrap();
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.level, Some(SkillLevel::Low));
        assert!(patch.name.is_none());
        assert!(patch.category.is_none());
    }

    #[test]
    fn test_profile_request_validation() {
        let req: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "phone_number": "0".repeat(21),
            "experience_years": "5+",
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("email").is_some());
        assert!(errors.get("phone_number").is_some());
    }

    #[test]
    fn test_health_response() {
        let json = serde_json::to_value(HealthResponse::up()).unwrap();
        assert_eq!(json["status"], "UP");
        assert_eq!(json["service"], "Portfolio API");
        assert!(json["version"].is_string());
        assert!(json["timestamp"].is_string());
    }
}

#[cfg(test)]
mod service_tests {
    use std::sync::Arc;

    use kernel::audit::Actor;
    use kernel::id::{ProfileId, ProjectId};

    use crate::application::{PortfolioCaches, ProfileService, ProjectService, SkillService};
    use crate::domain::entities::{NewProfile, NewProject, NewSkill, ProfilePatch, ProjectPatch, SkillPatch};
    use crate::domain::repository::ProfileRepository;
    use crate::domain::value_objects::{ProjectStatus, SkillCategory, SkillLevel};
    use crate::error::PortfolioError;
    use crate::infra::InMemoryPortfolioRepository;

    struct Fixture {
        repo: Arc<InMemoryPortfolioRepository>,
        caches: Arc<PortfolioCaches>,
        profiles: ProfileService<InMemoryPortfolioRepository>,
        projects: ProjectService<InMemoryPortfolioRepository>,
        skills: SkillService<InMemoryPortfolioRepository>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryPortfolioRepository::new());
        let caches = Arc::new(PortfolioCaches::default());
        Fixture {
            profiles: ProfileService::new(repo.clone(), caches.clone()),
            projects: ProjectService::new(repo.clone(), caches.clone()),
            skills: SkillService::new(repo.clone(), caches.clone()),
            repo,
            caches,
        }
    }

    fn owner() -> Actor {
        Actor::new("a@b.c")
    }

    fn project(title: &str, display_order: i32) -> NewProject {
        let mut p = NewProject::titled(title);
        p.display_order = display_order;
        p
    }

    fn skill(name: &str, category: SkillCategory, priority: i32) -> NewSkill {
        NewSkill {
            name: name.to_string(),
            category,
            level: SkillLevel::Medium,
            priority,
        }
    }

    #[tokio::test]
    async fn test_owner_profile_is_cached_until_update() {
        let f = fixture();
        f.repo
            .insert_profile(
                NewProfile {
                    full_name: "Owner".into(),
                },
                &Actor::system(),
            )
            .await
            .unwrap();

        f.profiles.get_owner_profile().await.unwrap();
        f.profiles.get_owner_profile().await.unwrap();
        assert_eq!(f.repo.query_count("find_owner"), 1);

        let patch = ProfilePatch {
            title: Some("New".into()),
            ..Default::default()
        };
        let updated = f.profiles.update_owner_profile(patch, &owner()).await.unwrap();
        assert_eq!(updated.audit.updated_by, "a@b.c");
        assert_eq!(updated.audit.created_by, "SYSTEM");

        let before = f.repo.query_count("find_owner");
        let profile = f.profiles.get_owner_profile().await.unwrap();
        assert_eq!(f.repo.query_count("find_owner"), before + 1);
        assert_eq!(profile.title.as_deref(), Some("New"));
    }

    #[tokio::test]
    async fn test_missing_owner_profile() {
        let f = fixture();
        let err = f.profiles.get_owner_profile().await.unwrap_err();
        assert!(matches!(err, PortfolioError::OwnerProfileMissing));
    }

    #[tokio::test]
    async fn test_delete_profile_by_id_evicts_owner() {
        let f = fixture();
        let first = f
            .repo
            .insert_profile(NewProfile { full_name: "First".into() }, &Actor::system())
            .await
            .unwrap();
        f.repo
            .insert_profile(NewProfile { full_name: "Second".into() }, &Actor::system())
            .await
            .unwrap();

        assert_eq!(f.profiles.get_owner_profile().await.unwrap().full_name, "First");
        f.profiles.delete_profile(first.id, &owner()).await.unwrap();
        assert_eq!(f.profiles.get_owner_profile().await.unwrap().full_name, "Second");

        let err = f.profiles.get_profile_by_id(first.id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Profile not found with id: {}", first.id));
        assert_eq!(f.profiles.get_all_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_profile() {
        let f = fixture();
        let err = f
            .profiles
            .update_profile(ProfileId::new(99), ProfilePatch::default(), &owner())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound { resource: "Profile", id: 99 }));
    }

    #[tokio::test]
    async fn test_project_lists_are_ordered_and_cached() {
        let f = fixture();
        f.projects.create_project(project("B", 1), &owner()).await.unwrap();
        f.projects.create_project(project("A", 0), &owner()).await.unwrap();
        f.projects.create_project(project("C", 1), &owner()).await.unwrap();

        let titles: Vec<_> = f
            .projects
            .get_all_projects()
            .await
            .unwrap()
            .iter()
            .map(|p| p.title.clone())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        f.projects.get_all_projects().await.unwrap();
        assert_eq!(f.repo.query_count("find_all_projects"), 1);

        f.projects.create_project(project("D", -1), &owner()).await.unwrap();
        let all = f.projects.get_all_projects().await.unwrap();
        assert_eq!(all[0].title, "D");
        assert_eq!(f.repo.query_count("find_all_projects"), 2);
    }

    #[tokio::test]
    async fn test_project_filters() {
        let f = fixture();
        let mut featured = project("Featured", 0);
        featured.is_featured = true;
        featured.category = Some("Backend".into());
        let mut archived = project("Old", 0);
        archived.status = ProjectStatus::Archived;
        f.projects.create_project(featured, &owner()).await.unwrap();
        f.projects.create_project(archived, &owner()).await.unwrap();

        let list = f.projects.get_featured_projects().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Featured");

        let list = f.projects.get_projects_by_category("Backend").await.unwrap();
        assert_eq!(list.len(), 1);

        let list = f
            .projects
            .get_projects_by_status("archived")
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Old");
    }

    #[tokio::test]
    async fn test_status_filter_matches_exact_code_only() {
        let f = fixture();
        let mut archived = project("Old", 0);
        archived.status = ProjectStatus::Archived;
        f.projects.create_project(archived, &owner()).await.unwrap();

        let list = f.projects.get_projects_by_status("ARCHIVED").await.unwrap();
        assert!(list.is_empty());
        let list = f.projects.get_projects_by_status("paused").await.unwrap();
        assert!(list.is_empty());
        assert_eq!(f.repo.query_count("find_projects_by_status"), 0);

        // Unknown codes are cached like any other key
        assert!(f.caches.projects.get("status_paused").await.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_title_only_among_live_rows() {
        let f = fixture();
        let first = f.projects.create_project(project("P1", 0), &owner()).await.unwrap();

        let err = f
            .projects
            .create_project(project("P1", 0), &owner())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project already exists with title: P1");

        f.projects.delete_project(first.id, &owner()).await.unwrap();
        let again = f.projects.create_project(project("P1", 0), &owner()).await.unwrap();
        assert_ne!(again.id, first.id);
    }

    #[tokio::test]
    async fn test_rename_checks_other_projects() {
        let f = fixture();
        let p1 = f.projects.create_project(project("P1", 0), &owner()).await.unwrap();
        f.projects.create_project(project("P2", 0), &owner()).await.unwrap();

        let rename = |title: &str| ProjectPatch {
            title: Some(title.to_string()),
            ..Default::default()
        };

        let err = f
            .projects
            .update_project(p1.id, rename("P2"), &owner())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::Duplicate { .. }));

        let same = f
            .projects
            .update_project(p1.id, rename("P1"), &owner())
            .await
            .unwrap();
        assert_eq!(same.title, "P1");
    }

    #[tokio::test]
    async fn test_update_is_visible_through_cache() {
        let f = fixture();
        let p = f.projects.create_project(project("P1", 0), &owner()).await.unwrap();
        assert!(!f.projects.get_project_by_id(p.id).await.unwrap().is_featured);

        let patch = ProjectPatch {
            is_featured: Some(true),
            ..Default::default()
        };
        f.projects.update_project(p.id, patch, &owner()).await.unwrap();

        assert!(f.projects.get_project_by_id(p.id).await.unwrap().is_featured);
        assert_eq!(f.projects.get_featured_projects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_soft_deleted_project_is_invisible() {
        let f = fixture();
        let p = f.projects.create_project(project("P1", 0), &owner()).await.unwrap();
        f.projects.get_all_projects().await.unwrap();

        f.projects.delete_project(p.id, &owner()).await.unwrap();

        let err = f.projects.get_project_by_id(p.id).await.unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound { resource: "Project", .. }));
        assert!(f.projects.get_all_projects().await.unwrap().is_empty());

        let err = f.projects.delete_project(p.id, &owner()).await.unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_project() {
        let f = fixture();
        let err = f
            .projects
            .get_project_by_id(ProjectId::new(404))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project not found with id: 404");
    }

    #[tokio::test]
    async fn test_skills_ordered_by_priority() {
        let f = fixture();
        f.skills.create_skill(skill("Docker", SkillCategory::Devops, 2), &owner()).await.unwrap();
        f.skills.create_skill(skill("Rust", SkillCategory::Backend, 0), &owner()).await.unwrap();
        f.skills.create_skill(skill("Go", SkillCategory::Backend, 0), &owner()).await.unwrap();

        let names: Vec<_> = f
            .skills
            .get_all_skills()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Rust", "Go", "Docker"]);

        let backend = f
            .skills
            .get_skills_by_category(SkillCategory::Backend)
            .await
            .unwrap();
        assert_eq!(backend.len(), 2);
    }

    #[tokio::test]
    async fn test_skill_update_evicts_by_id() {
        let f = fixture();
        let s = f
            .skills
            .create_skill(skill("Rust", SkillCategory::Backend, 0), &owner())
            .await
            .unwrap();

        f.skills.get_skill_by_id(s.id).await.unwrap();
        f.skills.get_skill_by_id(s.id).await.unwrap();
        assert_eq!(f.repo.query_count("find_skill_by_id"), 1);

        let patch = SkillPatch {
            level: Some(SkillLevel::High),
            ..Default::default()
        };
        f.skills.update_skill(s.id, patch, &owner()).await.unwrap();

        assert_eq!(f.skills.get_skill_by_id(s.id).await.unwrap().level, SkillLevel::High);
    }

    #[tokio::test]
    async fn test_skill_name_uniqueness() {
        let f = fixture();
        f.skills
            .create_skill(skill("Rust", SkillCategory::Backend, 0), &owner())
            .await
            .unwrap();
        let go = f
            .skills
            .create_skill(skill("Go", SkillCategory::Backend, 1), &owner())
            .await
            .unwrap();

        let err = f
            .skills
            .create_skill(skill("Rust", SkillCategory::Other, 0), &owner())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Skill already exists with name: Rust");

        let patch = SkillPatch {
            name: Some("Rust".into()),
            ..Default::default()
        };
        let err = f.skills.update_skill(go.id, patch, &owner()).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Duplicate { resource: "Skill", .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_project_creates_keep_titles_unique() {
        let f = fixture();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let projects = f.projects.clone();
                tokio::spawn(async move {
                    projects
                        .create_project(NewProject::titled("Race"), &owner())
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(
                    matches!(err, PortfolioError::Duplicate { resource: "Project", .. }),
                    "unexpected error: {err}"
                ),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(f.projects.get_all_projects().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_skill_creates_keep_names_unique() {
        let f = fixture();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let skills = f.skills.clone();
                tokio::spawn(async move {
                    skills
                        .create_skill(skill("Race", SkillCategory::Tools, i), &owner())
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => assert!(
                    matches!(err, PortfolioError::Duplicate { resource: "Skill", .. }),
                    "unexpected error: {err}"
                ),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(f.skills.get_all_skills().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_skill_delete() {
        let f = fixture();
        let s = f
            .skills
            .create_skill(skill("Rust", SkillCategory::Backend, 0), &owner())
            .await
            .unwrap();
        f.skills.get_skill_by_id(s.id).await.unwrap();

        f.skills.delete_skill(s.id, &owner()).await.unwrap();

        assert!(f.skills.get_skill_by_id(s.id).await.is_err());
        assert!(f.skills.get_all_skills().await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use kernel::principal::{Principal, Role};
    use tower::ServiceExt;

    use crate::application::PortfolioCaches;
    use crate::infra::InMemoryPortfolioRepository;
    use crate::presentation::router::portfolio_router_generic;

    fn app() -> Router {
        portfolio_router_generic(
            InMemoryPortfolioRepository::new(),
            Arc::new(PortfolioCaches::default()),
        )
    }

    fn admin_request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let mut req = builder.body(body).unwrap();
        req.extensions_mut()
            .insert(Principal::new("a@b.c", Role::Admin));
        req
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["message"], "Service is running normally");
        assert_eq!(body["data"]["status"], "UP");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_type_mismatch() {
        let response = app()
            .oneshot(Request::get("/projects/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errorCode"], "TYPE_MISMATCH");
    }

    #[tokio::test]
    async fn test_unknown_skill_category_is_type_mismatch() {
        let response = app()
            .oneshot(
                Request::get("/skills/category/mobile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errorCode"], "TYPE_MISMATCH");
        assert_eq!(body["message"], "Invalid value 'mobile' for parameter 'category'");
    }

    #[tokio::test]
    async fn test_skill_category_path_is_case_sensitive() {
        let response = app()
            .oneshot(
                Request::get("/skills/category/backend")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errorCode"], "TYPE_MISMATCH");
        assert_eq!(body["message"], "Invalid value 'backend' for parameter 'category'");

        let response = app()
            .oneshot(
                Request::get("/skills/category/BACKEND")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_project_status_is_empty_list() {
        let app = app();
        let response = app
            .clone()
            .oneshot(admin_request(
                Method::POST,
                "/admin/projects",
                Some(serde_json::json!({ "title": "P1" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        for (uri, expected) in [
            ("/projects/status/completed", 1),
            ("/projects/status/COMPLETED", 0),
            ("/projects/status/unknown", 0),
        ] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            let body = json(response).await;
            assert_eq!(body["data"].as_array().unwrap().len(), expected, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch_project() {
        let app = app();

        let response = app
            .clone()
            .oneshot(admin_request(
                Method::POST,
                "/admin/projects",
                Some(serde_json::json!({ "title": "P1", "technologies": ["Rust"] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json(response).await;
        assert_eq!(body["message"], "Created successfully");
        assert_eq!(body["data"]["status"], "completed");
        let id = body["data"]["id"].as_i64().unwrap();

        let response = app
            .oneshot(
                Request::get(format!("/projects/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["data"]["title"], "P1");
        assert_eq!(body["data"]["technologies"], serde_json::json!(["Rust"]));
        assert_eq!(body["data"]["gallery"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_project_validation_envelope() {
        let response = app()
            .oneshot(admin_request(
                Method::POST,
                "/admin/projects",
                Some(serde_json::json!({ "status": "paused" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errorCode"], "VALIDATION_ERROR");
        assert!(body["validationErrors"]["title"].is_string());
        assert!(body["validationErrors"]["status"].is_string());
    }

    #[tokio::test]
    async fn test_delete_skill_message_omits_data() {
        let app = app();
        let response = app
            .clone()
            .oneshot(admin_request(
                Method::POST,
                "/admin/skills",
                Some(serde_json::json!({ "name": "Rust", "category": "BACKEND", "level": "HIGH" })),
            ))
            .await
            .unwrap();
        let id = json(response).await["data"]["id"].as_i64().unwrap();

        let response = app
            .oneshot(admin_request(Method::DELETE, &format!("/admin/skills/{}", id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["message"], "Skill deleted successfully");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_cache_routes() {
        let app = app();
        let response = app
            .clone()
            .oneshot(admin_request(Method::DELETE, "/admin/projects/cache", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["message"], "Projects cache cleared");

        let response = app
            .oneshot(admin_request(Method::GET, "/admin/cache/stats", None))
            .await
            .unwrap();
        let body = json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"][0]["name"], "profile");
    }

    #[tokio::test]
    async fn test_admin_write_without_principal_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::post("/admin/projects")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":"P1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

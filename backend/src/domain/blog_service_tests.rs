//! Tests for the blog service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockBlogRepository, MockIdentityVerifier, MockUserRepository, UserPersistenceError,
};
use crate::domain::{
    BlogFieldPolicy, CredentialSecret, ErrorCode, LIKES_MAX, PersonName, User, Username,
};

const GOOD_TOKEN: &str = "good-token";

type Service = BlogService<MockBlogRepository, MockUserRepository, MockIdentityVerifier>;

fn service(
    blogs: MockBlogRepository,
    users: MockUserRepository,
    verifier: MockIdentityVerifier,
    policy: BlogPolicy,
) -> Service {
    BlogService::new(Arc::new(blogs), Arc::new(users), Arc::new(verifier), policy)
}

fn user_named(username: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("username"),
        PersonName::new("Test Person").expect("name"),
        CredentialSecret::new("hash"),
    )
}

#[fixture]
fn owner() -> User {
    user_named("mluukkai")
}

fn verifier_for(user_id: UserId) -> MockIdentityVerifier {
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_resolve().returning(move |credential| {
        if credential.expose() == GOOD_TOKEN {
            Ok(user_id)
        } else {
            Err(IdentityError::invalid_credential("bad signature"))
        }
    });
    verifier
}

fn token(raw: &str) -> Option<Credential> {
    Some(Credential::new(raw).expect("token"))
}

fn fields(title: &str, likes: u64) -> BlogFields {
    BlogFields {
        title: title.to_owned(),
        author: Some("Edsger W. Dijkstra".to_owned()),
        url: Some("http://www.cs.utexas.edu/~EWD/".to_owned()),
        likes,
    }
}

fn draft() -> BlogDraft {
    BlogDraft {
        title: Some("Canonical string reduction".into()),
        author: Some("Edsger W. Dijkstra".into()),
        url: None,
        likes: None,
    }
}

#[rstest]
#[tokio::test]
async fn create_sets_owner_defaults_likes_and_links_user(owner: User) {
    let owner_id = *owner.id();
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_insert()
        .withf(move |blog| blog.likes() == 0 && blog.is_owned_by(&owner_id))
        .times(1)
        .return_once(|_| Ok(()));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));
    users
        .expect_save_blog_ids()
        .withf(move |id, blogs| id == &owner_id && blogs.len() == 1)
        .times(1)
        .return_once(|_, _| Ok(()));

    let blog = service(blogs, users, verifier_for(owner_id), BlogPolicy::default())
        .create_blog(CreateBlogRequest {
            credential: token(GOOD_TOKEN),
            draft: draft(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(blog.likes(), 0);
    assert_eq!(blog.owner(), Some(&owner_id));
    assert!(blog.comments().is_empty());
}

#[rstest]
#[case(None, "token missing")]
#[case(token("forged"), "token invalid")]
#[tokio::test]
async fn create_requires_a_valid_credential(
    owner: User,
    #[case] credential: Option<Credential>,
    #[case] message: &str,
) {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*owner.id()),
        BlogPolicy::default(),
    )
    .create_blog(CreateBlogRequest {
        credential,
        draft: draft(),
    })
    .await
    .expect_err("unauthorized");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case(BlogFieldPolicy::MINIMAL, BlogDraft::default(), "title")]
#[case(BlogFieldPolicy::AUTHORED, BlogDraft { title: Some("t".into()), ..BlogDraft::default() }, "author")]
#[case(BlogFieldPolicy::LINKED, draft(), "url")]
#[tokio::test]
async fn create_names_the_first_missing_field(
    owner: User,
    #[case] fields: BlogFieldPolicy,
    #[case] draft: BlogDraft,
    #[case] expected_field: &str,
) {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);
    let policy = BlogPolicy {
        fields,
        ..BlogPolicy::default()
    };

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*owner.id()),
        policy,
    )
    .create_blog(CreateBlogRequest {
        credential: token(GOOD_TOKEN),
        draft,
    })
    .await
    .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], expected_field);
    assert_eq!(details["code"], "missing_field");
}

fn overflowing_likes() -> BlogDraft {
    BlogDraft {
        likes: Some(LIKES_MAX + 1),
        ..draft()
    }
}

fn assert_likes_out_of_range(error: &Error) {
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], "likes");
    assert_eq!(details["code"], "out_of_range");
    assert_eq!(details["max"], LIKES_MAX);
}

#[rstest]
#[tokio::test]
async fn create_rejects_likes_beyond_storage_range(owner: User) {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*owner.id()),
        BlogPolicy::default(),
    )
    .create_blog(CreateBlogRequest {
        credential: token(GOOD_TOKEN),
        draft: overflowing_likes(),
    })
    .await
    .expect_err("likes out of range");

    assert_likes_out_of_range(&error);
}

#[rstest]
#[tokio::test]
async fn update_rejects_likes_beyond_storage_range() {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_replace_fields().times(0);

    let error = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .update_blog(UpdateBlogRequest {
        id: BlogId::random(),
        credential: None,
        draft: overflowing_likes(),
    })
    .await
    .expect_err("likes out of range");

    assert_likes_out_of_range(&error);
}

#[rstest]
#[tokio::test]
async fn create_rejects_tokens_for_deleted_users(owner: User) {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_insert().times(0);
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(blogs, users, verifier_for(*owner.id()), BlogPolicy::default())
        .create_blog(CreateBlogRequest {
            credential: token(GOOD_TOKEN),
            draft: draft(),
        })
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn delete_by_owner_recomputes_owner_blog_list(owner: User) {
    let owner_id = *owner.id();
    let blog = Blog::new(BlogId::random(), fields("Go To", 5), Some(owner_id));
    let blog_id = *blog.id();
    let survivor = BlogId::random();

    let mut blogs = MockBlogRepository::new();
    let stored = blog.clone();
    blogs
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    blogs
        .expect_delete()
        .withf(move |id| id == &blog_id)
        .times(1)
        .return_once(|_| Ok(true));
    blogs
        .expect_list_ids_by_owner()
        .times(1)
        .return_once(move |_| Ok(vec![survivor]));
    let mut users = MockUserRepository::new();
    users
        .expect_save_blog_ids()
        .withf(move |id, blogs| id == &owner_id && blogs == [survivor])
        .times(1)
        .return_once(|_, _| Ok(()));

    let response = service(blogs, users, verifier_for(owner_id), BlogPolicy::default())
        .delete_blog(DeleteBlogRequest {
            id: blog_id,
            credential: token(GOOD_TOKEN),
        })
        .await
        .expect("delete succeeds");

    assert_eq!(response.deleted, blog);
}

#[rstest]
#[tokio::test]
async fn delete_by_someone_else_is_forbidden(owner: User) {
    let stranger = user_named("hellas");
    let blog = Blog::new(BlogId::random(), fields("Go To", 5), Some(*owner.id()));
    let blog_id = *blog.id();

    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(blog)));
    blogs.expect_delete().times(0);

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*stranger.id()),
        BlogPolicy::default(),
    )
    .delete_blog(DeleteBlogRequest {
        id: blog_id,
        credential: token(GOOD_TOKEN),
    })
    .await
    .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn delete_of_ownerless_blog_is_forbidden(owner: User) {
    let blog = Blog::new(BlogId::random(), fields("Legacy", 1), None);
    let blog_id = *blog.id();
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(blog)));
    blogs.expect_delete().times(0);

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*owner.id()),
        BlogPolicy::default(),
    )
    .delete_blog(DeleteBlogRequest {
        id: blog_id,
        credential: token(GOOD_TOKEN),
    })
    .await
    .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn delete_without_credential_never_touches_the_store(owner: User) {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_find_by_id().times(0);
    blogs.expect_delete().times(0);

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*owner.id()),
        BlogPolicy::default(),
    )
    .delete_blog(DeleteBlogRequest {
        id: BlogId::random(),
        credential: None,
    })
    .await
    .expect_err("unauthorized");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_blog_is_not_found(owner: User) {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*owner.id()),
        BlogPolicy::default(),
    )
    .delete_blog(DeleteBlogRequest {
        id: BlogId::random(),
        credential: token(GOOD_TOKEN),
    })
    .await
    .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn unrestricted_update_needs_no_credential(owner: User) {
    let owner_id = *owner.id();
    let blog_id = BlogId::random();
    let mut blogs = MockBlogRepository::new();
    blogs.expect_find_by_id().times(0);
    blogs
        .expect_replace_fields()
        .withf(|_, fields| fields.likes == 0 && fields.title == "Canonical string reduction")
        .times(1)
        .return_once(move |id, fields| {
            Ok(Some(Blog::new(*id, fields.clone(), Some(owner_id))))
        });

    let updated = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .update_blog(UpdateBlogRequest {
        id: blog_id,
        credential: None,
        draft: draft(),
    })
    .await
    .expect("update succeeds");

    assert_eq!(updated.id(), &blog_id);
    assert_eq!(updated.owner(), Some(&owner_id));
}

#[rstest]
#[tokio::test]
async fn owner_only_update_rejects_other_users(owner: User) {
    let stranger = user_named("hellas");
    let blog = Blog::new(BlogId::random(), fields("Go To", 5), Some(*owner.id()));
    let blog_id = *blog.id();
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(blog)));
    blogs.expect_replace_fields().times(0);
    let policy = BlogPolicy {
        update_access: UpdateAccess::OwnerOnly,
        ..BlogPolicy::default()
    };

    let error = service(
        blogs,
        MockUserRepository::new(),
        verifier_for(*stranger.id()),
        policy,
    )
    .update_blog(UpdateBlogRequest {
        id: blog_id,
        credential: token(GOOD_TOKEN),
        draft: draft(),
    })
    .await
    .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_blog_is_not_found() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_replace_fields()
        .return_once(|_, _| Ok(None));

    let error = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .update_blog(UpdateBlogRequest {
        id: BlogId::random(),
        credential: None,
        draft: draft(),
    })
    .await
    .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn replace_comments_of_missing_blog_is_not_found() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_replace_comments()
        .return_once(|_, _| Ok(None));

    let error = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .replace_comments(ReplaceCommentsRequest {
        id: BlogId::random(),
        comments: vec!["nice".into()],
    })
    .await
    .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_expands_each_owner_once(owner: User) {
    let owner_id = *owner.id();
    let listed = vec![
        Blog::new(BlogId::random(), fields("one", 1), Some(owner_id)),
        Blog::new(BlogId::random(), fields("two", 2), Some(owner_id)),
        Blog::new(BlogId::random(), fields("three", 3), None),
    ];
    let mut blogs = MockBlogRepository::new();
    blogs.expect_list().return_once(move || Ok(listed));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .withf(move |ids| ids == [owner_id])
        .times(1)
        .return_once(move |_| Ok(vec![owner]));

    let populated = service(
        blogs,
        users,
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .list_blogs()
    .await
    .expect("list succeeds");

    assert_eq!(populated.len(), 3);
    assert_eq!(
        populated[0].owner.as_ref().map(|o| o.username.as_str()),
        Some("mluukkai")
    );
    assert_eq!(populated[1].owner, populated[0].owner);
    assert!(populated[2].owner.is_none());
}

#[rstest]
#[tokio::test]
async fn get_maps_missing_blog_to_not_found() {
    let mut blogs = MockBlogRepository::new();
    blogs.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .get_blog(&BlogId::random())
    .await
    .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn store_outages_map_to_service_unavailable() {
    let mut blogs = MockBlogRepository::new();
    blogs
        .expect_list()
        .return_once(|| Err(BlogRepositoryError::connection("pool timed out")));

    let error = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .list_blogs()
    .await
    .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn owner_lookup_failures_surface_as_internal(owner: User) {
    let listed = vec![Blog::new(BlogId::random(), fields("one", 1), Some(*owner.id()))];
    let mut blogs = MockBlogRepository::new();
    blogs.expect_list().return_once(move || Ok(listed));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_ids()
        .return_once(|_| Err(UserPersistenceError::query("relation missing")));

    let error = service(
        blogs,
        users,
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .list_blogs()
    .await
    .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn stats_summarise_the_collection() {
    let listed = vec![
        Blog::new(BlogId::random(), fields("React patterns", 7), None),
        Blog::new(BlogId::random(), fields("Canonical string reduction", 12), None),
    ];
    let mut blogs = MockBlogRepository::new();
    blogs.expect_list().return_once(move || Ok(listed));

    let stats = service(
        blogs,
        MockUserRepository::new(),
        MockIdentityVerifier::new(),
        BlogPolicy::default(),
    )
    .blog_stats()
    .await
    .expect("stats");

    assert_eq!(stats.total_likes, 19);
    assert_eq!(
        stats.favorite_blog.map(|b| b.title),
        Some("Canonical string reduction".to_owned())
    );
}

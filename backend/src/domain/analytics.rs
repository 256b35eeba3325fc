//! Aggregate statistics over a snapshot of blogs.
//!
//! Every function is a pure reduction over a borrowed slice. Ties are
//! resolved in favour of the record or author seen first in input order.

use std::collections::HashMap;

use serde::Serialize;

use super::{Blog, PopulatedBlog};

/// Minimal view of a blog needed by the reductions.
pub trait BlogRecord {
    fn title(&self) -> &str;
    fn author(&self) -> Option<&str>;
    fn likes(&self) -> u64;
}

impl BlogRecord for Blog {
    fn title(&self) -> &str {
        Blog::title(self)
    }

    fn author(&self) -> Option<&str> {
        Blog::author(self)
    }

    fn likes(&self) -> u64 {
        Blog::likes(self)
    }
}

impl BlogRecord for PopulatedBlog {
    fn title(&self) -> &str {
        self.blog.title()
    }

    fn author(&self) -> Option<&str> {
        self.blog.author()
    }

    fn likes(&self) -> u64 {
        self.blog.likes()
    }
}

/// Reduced projection of the most liked blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: u64,
}

/// Author with the highest number of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogCount {
    pub author: Option<String>,
    pub blogs: u64,
}

/// Author with the highest cumulative likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: u64,
}

/// All four aggregates computed over the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogCount>,
    pub most_likes: Option<AuthorLikes>,
}

/// Sum of likes across `blogs`; zero for an empty slice.
///
/// # Examples
/// ```
/// use bloglist::domain::analytics::total_likes;
/// use bloglist::domain::Blog;
///
/// assert_eq!(total_likes::<Blog>(&[]), 0);
/// ```
pub fn total_likes<T: BlogRecord>(blogs: &[T]) -> u64 {
    blogs
        .iter()
        .fold(0_u64, |total, blog| total.saturating_add(blog.likes()))
}

/// The blog with the most likes, earliest first on ties.
pub fn favorite_blog<T: BlogRecord>(blogs: &[T]) -> Option<FavoriteBlog> {
    let best = blogs.iter().reduce(|best, candidate| {
        if candidate.likes() > best.likes() {
            candidate
        } else {
            best
        }
    })?;
    Some(FavoriteBlog {
        title: best.title().to_owned(),
        author: best.author().map(str::to_owned),
        likes: best.likes(),
    })
}

/// The author with the most posts.
pub fn most_blogs<T: BlogRecord>(blogs: &[T]) -> Option<AuthorBlogCount> {
    let (author, blogs) = leader(tally(blogs, |_| 1))?;
    Some(AuthorBlogCount { author, blogs })
}

/// The author whose posts have the most likes in total.
pub fn most_likes<T: BlogRecord>(blogs: &[T]) -> Option<AuthorLikes> {
    let (author, likes) = leader(tally(blogs, BlogRecord::likes))?;
    Some(AuthorLikes { author, likes })
}

/// Compute every aggregate over one snapshot.
pub fn summarize<T: BlogRecord>(blogs: &[T]) -> BlogStats {
    BlogStats {
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

/// Per-author running totals in first-seen order.
fn tally<'a, T, F>(blogs: &'a [T], weight: F) -> Vec<(Option<&'a str>, u64)>
where
    T: BlogRecord,
    F: Fn(&T) -> u64,
{
    let mut order: Vec<(Option<&'a str>, u64)> = Vec::new();
    let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
    for blog in blogs {
        let author = blog.author();
        let slot = *index.entry(author).or_insert_with(|| {
            order.push((author, 0));
            order.len() - 1
        });
        if let Some((_, total)) = order.get_mut(slot) {
            *total = total.saturating_add(weight(blog));
        }
    }
    order
}

fn leader(tally: Vec<(Option<&str>, u64)>) -> Option<(Option<String>, u64)> {
    // Strict comparison keeps the first-seen author on ties.
    let mut entries = tally.into_iter();
    let first = entries.next()?;
    let (author, total) = entries.fold(first, |best, entry| {
        if entry.1 > best.1 { entry } else { best }
    });
    Some((author.map(str::to_owned), total))
}

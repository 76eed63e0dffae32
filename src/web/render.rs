//! HTML rendering of view state.

use crate::tmdb::Movie;
use crate::views::card::{backdrop_url, MovieCard};
use crate::views::details::DetailsState;
use crate::views::finder::{Category, FinderState};
use crate::views::nav::{Route, BRAND, NAV_LINKS};
use crate::views::recommendations::{paragraphs, RecommendationsState, EXAMPLE_PROMPTS};

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #171717; color: #e5e5e5; }
a { color: inherit; text-decoration: none; }
nav { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: linear-gradient(to right, #525252, #262626); }
nav .brand { font-size: 1.25rem; font-weight: bold; }
nav .links a { margin-left: 1rem; padding: .25rem .75rem; border-radius: .25rem; }
nav .links a:hover { background: #525252; }
main { max-width: 80rem; margin: 0 auto; padding: 2rem 1rem; }
.banner { margin-bottom: 1.5rem; padding: 1rem; background: #fee2e2; color: #b91c1c; border-radius: .5rem; }
.spinner { margin: 4rem auto; width: 3rem; height: 3rem; border-radius: 50%; border: 2px solid #3b82f6; border-left-color: transparent; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.search { display: flex; gap: 1rem; margin-bottom: 1rem; }
.search input { flex-grow: 1; padding: .75rem 1rem; border-radius: .5rem; border: 1px solid #d4d4d4; }
.search button { padding: .75rem 1.5rem; border-radius: .5rem; border: 0; cursor: pointer; }
.categories { display: flex; flex-wrap: wrap; gap: .75rem; justify-content: center; margin-bottom: 2rem; }
.categories a { padding: .5rem 1.25rem; border-radius: 9999px; background: #f3f4f6; color: #374151; font-size: .875rem; }
.categories a.selected { background: #525252; color: white; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(12rem, 1fr)); gap: 1.5rem; }
.movie-card { display: block; background: white; color: #111827; border-radius: .5rem; overflow: hidden; }
.movie-card img { width: 100%; height: 16rem; object-fit: cover; }
.movie-card .body { padding: 1rem; }
.movie-card h3 { margin: 0 0 .25rem; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.line-clamp-2 { display: -webkit-box; -webkit-line-clamp: 2; -webkit-box-orient: vertical; overflow: hidden; font-size: .875rem; color: #4b5563; }
.details { display: flex; gap: 2rem; flex-wrap: wrap; }
.details .primary { flex: 3; min-width: 20rem; }
.details aside { flex: 1; min-width: 14rem; background: #525252; border-radius: .5rem; padding: 1.5rem; align-self: flex-start; }
.player { position: relative; padding-top: 56.25%; background: #171717; }
.player > * { position: absolute; inset: 0; width: 100%; height: 100%; border: 0; }
.player .placeholder { display: flex; flex-direction: column; align-items: center; justify-content: center; }
.trending-item { display: block; padding: .5rem; border-radius: .25rem; }
.trending-item:hover { background: #404040; }
.panel { background: white; color: #1f2937; border-radius: .5rem; padding: 1.5rem; margin-bottom: 2rem; }
.panel textarea { width: 100%; min-height: 150px; padding: 1rem; box-sizing: border-box; }
.examples { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1rem; }
.examples a { display: block; background: #f3f4f6; color: #111827; padding: 1rem; border-radius: .5rem; }
"#;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the navigation shell.
pub fn layout(title: &str, body: &str) -> String {
    let mut links = String::new();
    for link in NAV_LINKS {
        links.push_str(&format!(
            r#"<a href="{}">{}</a>"#,
            link.route.path(),
            link.label
        ));
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {brand}</title>
<style>{style}</style>
</head>
<body>
<nav><a class="brand" href="{home}">{brand}</a><div class="links">{links}</div></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        brand = BRAND,
        style = STYLE,
        home = Route::Finder.path(),
        links = links,
        body = body,
    )
}

fn spinner() -> &'static str {
    r#"<div class="spinner" role="status" aria-label="Loading"></div>"#
}

fn banner(message: &str) -> String {
    format!(r#"<div class="banner">{}</div>"#, escape(message))
}

pub fn movie_card(card: &MovieCard) -> String {
    let movie = card.movie;
    format!(
        r#"<a class="movie-card" href="{href}"><img src="{poster}" alt="{title}" loading="lazy"><div class="body"><h3>{title}</h3><div class="rating">&#11088; {rating} <span class="year">{year}</span></div><p class="line-clamp-2">{overview}</p></div></a>"#,
        href = card.route().path(),
        poster = escape(&card.poster_url()),
        title = escape(&movie.title),
        rating = movie.rating(),
        year = escape(movie.year()),
        overview = escape(&movie.overview),
    )
}

fn card_grid(movies: &[Movie], image_base_url: &str) -> String {
    let mut html = String::from(r#"<div class="grid">"#);
    for movie in movies {
        html.push_str(&movie_card(&MovieCard::new(movie, image_base_url)));
    }
    html.push_str("</div>");
    html
}

fn finder_href(category: Category, query: &str) -> String {
    let mut href = format!("/?action=category&category={}", category.as_str());
    if !query.is_empty() {
        href.push_str("&query=");
        href.push_str(&urlencoding::encode(query));
    }
    href
}

pub fn render_finder(state: &FinderState, image_base_url: &str) -> String {
    let mut body = String::from(
        r#"<div style="text-align:center;margin-bottom:2.5rem"><h1>JJ-MOVIE-HUB</h1><p>Discover trending movies or search for your favorites</p></div>"#,
    );

    let disabled = if state.loading { " disabled" } else { "" };
    body.push_str(&format!(
        r#"<form class="search" method="get" action="/"><input type="text" name="query" value="{query}" placeholder="Search for movies..."><input type="hidden" name="category" value="{category}"><button type="submit" name="action" value="search"{disabled}>Search</button><button type="submit" name="action" value="trending"{disabled}>Trending</button></form>"#,
        query = escape(&state.query),
        category = state.category.as_str(),
        disabled = disabled,
    ));

    body.push_str(r#"<div class="categories">"#);
    for category in Category::ALL {
        let class = if category == state.category { "selected" } else { "" };
        body.push_str(&format!(
            r#"<a class="{}" href="{}">{}</a>"#,
            class,
            escape(&finder_href(category, &state.query)),
            category.as_str()
        ));
    }
    body.push_str("</div>");

    if let Some(ref error) = state.error {
        body.push_str(&banner(error));
    }

    if state.loading {
        body.push_str(spinner());
    } else if state.movies.is_empty() {
        body.push_str(r#"<div style="text-align:center;padding:2.5rem"><p>No movies found</p></div>"#);
    } else {
        body.push_str(&card_grid(&state.movies, image_base_url));
    }

    layout("Movie Finder", &body)
}

pub fn render_details(state: &DetailsState, image_base_url: &str) -> String {
    if state.loading {
        return layout("Loading", spinner());
    }
    let movie = match state.movie {
        Some(ref movie) => movie,
        None => return render_movie_not_found(state.error.as_deref()),
    };

    let player = match state.trailer {
        Some(ref trailer) => {
            let preview = backdrop_url(image_base_url, movie.backdrop_path.as_deref())
                .map(|url| format!(r#" data-preview="{}""#, escape(&url)))
                .unwrap_or_default();
            format!(
                r#"<iframe src="{}" title="{}" allowfullscreen{}></iframe>"#,
                escape(&trailer.embed_url()),
                escape(&trailer.name),
                preview
            )
        }
        None => format!(
            r#"<div class="placeholder"><p>Trailer not available</p><p>{}</p></div>"#,
            escape(&movie.title)
        ),
    };

    let runtime = movie
        .runtime
        .map(|r| format!("{} min", r))
        .unwrap_or_default();

    let mut body = String::from(r#"<div class="details"><div class="primary">"#);
    body.push_str(&format!(r#"<div class="player">{}</div>"#, player));
    body.push_str(&format!(
        r#"<div class="info"><h1>{title} ({year})</h1><p><span class="score">{rating}/10</span> <span>{runtime} | {genres}</span></p><p>{overview}</p></div>"#,
        title = escape(&movie.title),
        year = escape(movie.year()),
        rating = movie.rating(),
        runtime = runtime,
        genres = escape(&movie.genre_names()),
        overview = escape(&movie.overview),
    ));

    body.push_str("<section><h2>Related Videos</h2>");
    body.push_str(&card_grid(&state.related, image_base_url));
    body.push_str("</section></div>");

    body.push_str("<aside><h2>TRENDS NOW</h2>");
    for trending in &state.trending {
        body.push_str(&format!(
            r#"<a class="trending-item" href="{}"><p>{}</p><p>{}</p></a>"#,
            Route::Movie(trending.id).path(),
            escape(&trending.title),
            escape(trending.year()),
        ));
    }
    body.push_str("</aside></div>");

    layout(&movie.title, &body)
}

pub fn render_movie_not_found(error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(error) = error {
        body.push_str(&banner(error));
    }
    body.push_str(r#"<div class="error"><h1>Movie not found</h1></div>"#);
    layout("Movie not found", &body)
}

pub fn render_recommendations(state: &RecommendationsState) -> String {
    let mut body = String::from(
        r#"<div class="panel" style="background:linear-gradient(to right,#1e3a8a,#1d4ed8);color:white"><h1>AI RECOMMENDATIONS</h1><p>Get personalized movie suggestions based on your unique preferences.</p><p>Tell us what you like and our AI will find perfect matches for you!</p></div>"#,
    );

    let (label, disabled) = if state.loading {
        ("Generating Recommendations...", " disabled")
    } else {
        ("Get AI Recommendations", "")
    };
    body.push_str(&format!(
        r#"<div class="panel"><h2>Tell Us Your Preferences</h2><form method="post" action="{action}"><textarea name="preferences" placeholder="Example: 'I like sci-fi movies with strong female leads from the 2010s' or 'Recommend dark comedy films similar to The Big Lebowski'">{preferences}</textarea><button type="submit"{disabled}>{label}</button></form></div>"#,
        action = Route::Recommendations.path(),
        preferences = escape(&state.preferences),
        disabled = disabled,
        label = label,
    ));

    if state.loading {
        body.push_str(spinner());
    } else if let Some(text) = state.recommendations.as_deref().filter(|t| !t.is_empty()) {
        body.push_str(r#"<div class="panel"><h2>Your Personalized Recommendations</h2><div class="recommendations">"#);
        for line in paragraphs(text) {
            body.push_str(&format!("<p>{}</p>", escape(line)));
        }
        body.push_str("</div></div>");
    }

    body.push_str(r#"<div><h2>POPULAR SEARCHES</h2><div class="examples">"#);
    for (index, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        body.push_str(&format!(
            r#"<a href="{}?example={}">"{}"</a>"#,
            Route::Recommendations.path(),
            index,
            escape(prompt)
        ));
    }
    body.push_str("</div></div>");

    layout("AI Recommendations", &body)
}

pub fn render_page_not_found() -> String {
    layout(
        "Page Not Found",
        r#"<div class="error"><h1>Page Not Found</h1><p><a href="/">Back to Movie Finder</a></p></div>"#,
    )
}

use std::fmt::Write;

/// Render the search page, optionally with the results of a submitted query.
pub fn render_page(query: Option<&str>, recommendations: &[String]) -> String {
    let mut body = String::new();
    body.push_str(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Movie Recommender</title></head>\n<body>\n",
    );
    body.push_str("<h1>Movie Recommender</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/\">\n<input type=\"text\" name=\"title\" placeholder=\"Enter a movie title\" required>\n<button type=\"submit\">Recommend</button>\n</form>\n",
    );
    if let Some(q) = query {
        let _ = write!(body, "<h2>Results for {}</h2>\n<ul>\n", escape(q));
        for title in recommendations {
            let _ = write!(body, "<li>{}</li>\n", escape(title));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("</body>\n</html>\n");
    body
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

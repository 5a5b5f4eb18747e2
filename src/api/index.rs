use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html("Welcome to spotyauth! <a href='/login'>Login with Spotify</a>")
}

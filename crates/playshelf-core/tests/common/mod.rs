#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A small catalog document in the site's `games.json` shape.
pub const CATALOG_JSON: &str = r#"[
    {
        "id": 1,
        "title": "Bubble Pop",
        "description": "Match three bubbles of the same colour",
        "category": "puzzle",
        "tags": ["match3", "casual"],
        "rating": 4.5,
        "image": "images/bubble-pop.png",
        "embed": "https://embed.example/bubble-pop"
    },
    {
        "id": 2,
        "title": "Speed Race",
        "description": "Arcade street racing",
        "category": "racing",
        "tags": ["fast", "cars"],
        "rating": 3.0,
        "image": "images/speed-race.png",
        "embed": "https://embed.example/speed-race"
    },
    {
        "id": 3,
        "title": "Block Drop",
        "description": "Stack falling blocks",
        "category": "puzzle",
        "tags": ["tetris"],
        "rating": 4.8,
        "image": "images/block-drop.png",
        "embed": "https://embed.example/block-drop"
    }
]"#;

/// The same catalog shape with ids written as JSON strings of digits.
pub const STRING_ID_CATALOG_JSON: &str = r#"[
    {
        "id": "1",
        "title": "Éclair Chef",
        "description": "Bake pastries against the clock",
        "category": "cooking",
        "tags": ["baking"],
        "rating": 4.1,
        "image": "images/eclair-chef.png",
        "embed": "https://embed.example/eclair-chef"
    },
    {
        "id": "2",
        "title": "Apple Toss",
        "description": "Throw apples into baskets",
        "category": "cooking",
        "tags": ["fruit"],
        "rating": 3.6,
        "image": "images/apple-toss.png",
        "embed": "https://embed.example/apple-toss"
    }
]"#;

/// Serve one HTTP response on a loopback port and return the URL to fetch.
pub async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/data/games.json")
}

/// A loopback URL with nothing listening behind it.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/data/games.json")
}

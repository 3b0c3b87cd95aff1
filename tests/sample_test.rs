use grobid_trainprep::clients::PdfDownloader;
use grobid_trainprep::orchestrator::{sample_pdfs, SamplePlan};
use grobid_trainprep::{BatchLayout, Config};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 启动一个简单的 HTTP 服务：`*.pdf` 返回 PDF 内容，其余返回 HTML
async fn serve_pdfs() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let request_line = String::from_utf8_lossy(&request).to_string();
            let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            let body: Vec<u8> = if path.ends_with(".pdf") {
                format!("%PDF-1.4 {}", path).into_bytes()
            } else {
                b"<html>paywall</html>".to_vec()
            };
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = socket.write_all(header.as_bytes()).await;
            let _ = socket.write_all(&body).await;
            let _ = socket.shutdown().await;
        }
    });

    addr
}

#[tokio::test]
async fn test_sample_downloads_by_journal_priority() {
    let addr = serve_pdfs().await;
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("samples.csv");
    fs::write(
        &catalog,
        format!(
            "journal,doi,oa_url\n\
             Beta Law,https://doi.org/10.1/b1,{addr}/b1.pdf\n\
             Alpha Law,10.1/a1,{addr}/a1\n\
             Alpha Law,10.1/a2,{addr}/a2.pdf\n\
             Beta Law,10.1/b2,{addr}/b2.pdf\n\
             Gamma Law,10.1/g1,{addr}/g1.pdf\n"
        ),
    )
    .unwrap();

    let config = Config::default();
    let layout = BatchLayout::new(dir.path().join("batch"), &config);
    let downloader = PdfDownloader::new(&config).unwrap();
    let plan = SamplePlan {
        per_journal: 1,
        journals: 2,
        delay: Duration::ZERO,
    };

    let stats = sample_pdfs(&layout, &catalog, &downloader, &plan).await.unwrap();

    assert_eq!(stats.target, 2);
    assert_eq!(stats.downloaded, 2);
    assert_eq!(stats.unavailable, 1);
    assert_eq!(stats.journals_used, vec!["Alpha Law", "Beta Law"]);

    let mut pdfs: Vec<_> = fs::read_dir(layout.input_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    pdfs.sort();
    assert_eq!(pdfs, vec!["10.1__a2.pdf", "10.1__b1.pdf"]);
    let content = fs::read(layout.input_dir().join("10.1__b1.pdf")).unwrap();
    assert!(content.starts_with(b"%PDF"));

    let saved = fs::read_to_string(&catalog).unwrap();
    let lines: Vec<&str> = saved.lines().collect();
    assert_eq!(lines[0], "journal,doi,oa_url,downloaded");
    assert!(lines[1].ends_with(",yes"));
    assert!(lines[2].ends_with(",unavailable"));
    assert!(lines[3].ends_with(",yes"));
    assert!(lines[4].ends_with(','));
    assert!(lines[5].ends_with(','));

    // 再次运行：Gamma 没有下载过，优先；Alpha 已无待下载行
    let stats = sample_pdfs(&layout, &catalog, &downloader, &plan).await.unwrap();
    assert_eq!(stats.downloaded, 2);
    assert_eq!(stats.journals_used, vec!["Gamma Law", "Beta Law"]);
    assert!(layout.input_dir().join("10.1__g1.pdf").is_file());
    assert!(layout.input_dir().join("10.1__b2.pdf").is_file());
}

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use assert_cmd::Command;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

fn base_cmd(mut cmd: Command, root: &Path) -> Command {
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("EXDOCS_PROJECT_ROOT");
    cmd.env_remove("EXDOCS_CONFIG");
    cmd.env("EXDOCS_FORCE_NON_INTERACTIVE", "1");
    cmd.env("NO_COLOR", "1");
    cmd.arg("--project-root").arg(root);
    cmd
}

/// `exdocs-convert` against `root`.
#[allow(dead_code)]
pub fn convert_cmd(root: &Path) -> Command {
    base_cmd(Command::new(assert_cmd::cargo::cargo_bin!("exdocs-convert")), root)
}

/// `exdocs-generate` against `root`, with the credential unset.
#[allow(dead_code)]
pub fn generate_cmd(root: &Path) -> Command {
    let mut cmd = base_cmd(Command::new(assert_cmd::cargo::cargo_bin!("exdocs-generate")), root);
    cmd.env_remove("GEMINI_API_KEY");
    cmd
}

/// `exdocs-migrate` against `root`.
#[allow(dead_code)]
pub fn migrate_cmd(root: &Path) -> Command {
    base_cmd(Command::new(assert_cmd::cargo::cargo_bin!("exdocs-migrate")), root)
}

/// Two sections (listed out of order) and three examples, one with an image.
#[allow(dead_code)]
pub fn write_catalog(root: &Path) {
    let data = root.join("data");
    std::fs::create_dir_all(&data).unwrap();

    let sections = json!({
        "sections": [
            { "id": "images", "title": "Images", "description": "Working with images.", "order": 2 },
            { "id": "text", "title": "Text", "description": "Working with text.", "order": 1 }
        ]
    });
    let examples = json!({
        "examples": [
            {
                "id": "hello-world",
                "section_id": "text",
                "title": "Hello World",
                "description": "The smallest program.",
                "order": 2,
                "code_segments": [
                    { "annotation": "Import the client." },
                    { "display_code": "from google import genai" },
                    { "annotation": "Say hello.", "display_code": "print('hello')" }
                ],
                "shell_segments": [
                    { "explanation": "Run it:", "command": "python hello.py", "output": "hello" }
                ],
                "documentation_links": ["https://ai.google.dev/docs"]
            },
            {
                "id": "streaming",
                "section_id": "text",
                "title": "Streaming",
                "order": 1,
                "code_segments": [{ "display_code": "for chunk in stream: print(chunk)" }]
            },
            {
                "id": "describe-image",
                "section_id": "images",
                "title": "Describe an Image",
                "order": 1,
                "image_data": [
                    { "path": "assets/cat.png", "filename": "cat.png", "caption": "A cat" },
                    { "path": "assets/missing.png", "filename": "missing.png" }
                ]
            }
        ]
    });

    std::fs::write(data.join("sections.json"), sections.to_string()).unwrap();
    std::fs::write(data.join("examples.json"), examples.to_string()).unwrap();

    let assets = root.join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("cat.png"), b"\x89PNG fake").unwrap();
}

/// Write `exdocs.toml` into `root`.
#[allow(dead_code)]
pub fn write_config(root: &Path, contents: &str) {
    std::fs::write(root.join("exdocs.toml"), contents).unwrap();
}

/// Read a file under `root` as a string.
#[allow(dead_code)]
pub fn read(root: &Path, relative: &str) -> String {
    std::fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
}

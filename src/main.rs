use color_eyre::Result;
use futures::StreamExt;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use kimiai::cli::{parse_args, version_line, ChatArgs, CliCommand, USAGE};
use kimiai::{
    CompletionRequest, KimiClient, KimiError, SessionConfig, StreamEvent, UploadError,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let args = match command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Chat(args) => args,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !args.cookies.exists() {
        eprintln!(
            "Error: '{}' not found. Export your Kimi session cookies to this file.",
            args.cookies.display()
        );
        std::process::exit(1);
    }

    let client = KimiClient::new(SessionConfig::new().with_cookies_path(&args.cookies))?;
    let result = run_chat(&client, &args).await;
    client.close().await;

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_chat(client: &KimiClient, args: &ChatArgs) -> Result<(), KimiError> {
    println!("Creating a new chat...");
    let chat = client.create_chat("My First API Chat").await?;
    println!("Chat created with ID: {}", chat.conversation_id());

    let mut refs = Vec::new();
    let mut prompt = args.prompt().to_string();
    if let Some(path) = &args.file {
        println!("\nUploading file: {}...", path.display());
        match client.upload_file(path).await {
            Ok(file) => {
                println!("File uploaded successfully! ID: {}", file.id);
                refs.push(file.id);
            }
            Err(KimiError::Upload(e)) => {
                println!("File upload failed: {}", e);
                println!("Proceeding without the file context.");
                if args.prompt.is_none() {
                    prompt = kimiai::cli::args::DEFAULT_PROMPT.to_string();
                }
            }
            Err(e) => return Err(e),
        }
    }

    let request = CompletionRequest::new(prompt.as_str())
        .with_search(args.use_search)
        .with_refs(refs);

    println!("\nSending prompt: '{}'", prompt);
    println!("Streaming response from Kimi:");
    println!("{}", "-".repeat(30));

    let mut events = chat.send(&request).await?;
    let mut stdout = std::io::stdout();
    while let Some(event) = events.next().await {
        match event? {
            StreamEvent::Completion { text } => {
                print!("{}", text);
                let _ = stdout.flush();
            }
            StreamEvent::SearchInfo { search_type, .. } => {
                println!("\n[searching: {}]", search_type);
            }
            StreamEvent::Status => {}
        }
    }

    println!("\n{}", "-".repeat(30));
    println!("\nFull response received.");
    Ok(())
}

fn report(err: &KimiError) {
    match err {
        KimiError::Auth(e) => eprintln!("\nERROR: Authentication failed: {}", e),
        KimiError::Api(e) => {
            eprintln!("\nERROR: An API error occurred: {}", e);
            eprintln!("Response body: {}", e.body());
        }
        KimiError::Upload(UploadError::FileNotFound { path }) => {
            eprintln!("\nERROR: File not found: {}", path.display());
        }
        KimiError::Upload(e) => eprintln!("\nERROR: File upload failed: {}", e),
        other => eprintln!("\nERROR: An unexpected library error occurred: {}", other),
    }
    eprintln!("Hint: {}", err.recovery_hint());
}

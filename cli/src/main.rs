use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use resume_scraper::query::SearchQuery;
use resume_scraper::{fetch_resumes, relevance, Site};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Target {
    WorkUa,
    RobotaUa,
}

impl Target {
    fn site(self) -> Site {
        match self {
            Target::WorkUa => Site::WorkUa,
            Target::RobotaUa => Site::RobotaUa,
        }
    }
}

/// Search résumés on the supported job boards and print them ranked by
/// keyword relevance.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Job position to search for, e.g. "data scientist"
    position: String,

    /// Job boards to walk, in order; defaults to both
    #[clap(long, value_enum)]
    site: Vec<Target>,

    /// Location to search in, e.g. "kyiv"
    #[clap(long)]
    location: Option<String>,

    /// Keywords to rank skills against, comma separated
    #[clap(long, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Experience band code ("0".."5"), resolved per site
    #[clap(long)]
    experience: Option<String>,

    /// Salary band code, resolved per site
    #[clap(long)]
    salary: Option<String>,

    /// Cap on the number of returned resumes
    #[clap(long)]
    limit: Option<usize>,

    /// Print results as JSON instead of text
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();

    let mut query = SearchQuery::new(args.position.to_lowercase());
    query.location = args.location.map(|l| l.to_lowercase());
    query.keywords = args
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    query.experience = args.experience;
    query.salary = args.salary;
    query.limit = args.limit;

    let targets = if args.site.is_empty() {
        vec![Target::WorkUa, Target::RobotaUa]
    } else {
        args.site
    };
    let mut resumes = Vec::new();
    for target in targets {
        resumes.extend(fetch_resumes(target.site(), &query).await);
    }
    // per-site walks already rank and truncate; rank the merged list again
    // so results from different sites interleave by score
    let mut resumes = relevance::rank(resumes, &query.keywords);
    if let Some(limit) = query.limit {
        resumes.truncate(limit);
    }

    if resumes.is_empty() {
        println!("No resumes found.");
        return;
    }
    if args.json {
        match serde_json::to_string_pretty(&resumes) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("failed to serialize results: {}", e),
        }
        return;
    }
    for resume in &resumes {
        println!(
            "Resume URL: {}, Score: {}",
            resume.link,
            resume.relevance_score.unwrap_or(0)
        );
        println!("{}", resume);
    }
}

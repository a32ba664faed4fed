use clap::{Args, Parser, Subcommand};
use mib_core::{
    alphabet_bar, parse_letter_choice, parse_page, CoreConfig, DetailRoute, DirectoryQuery,
    DirectoryState, DoctorCard, DoctorDetail, DoctorField, DoctorRepository, HttpDoctorRepository,
    JsonFileRepository, PageSize,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mib")]
#[command(about = "MIB doctors directory CLI")]
struct Cli {
    /// Doctor Repository base URL (overrides MIB_DOCTORS_URL)
    #[arg(long, global = true, conflicts_with = "file")]
    source: Option<String>,
    /// Read doctors from a JSON file instead of the repository
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List doctors, filtered and paginated
    List(ListArgs),
    /// Suggest values for one field
    Suggest {
        /// name, speciality or clinic
        field: DoctorField,
        /// Text typed so far
        #[arg(default_value = "")]
        partial: String,
    },
    /// Show one doctor
    Show {
        /// Doctor id, or a detail route such as /doctor/12?page=2
        target: String,
        /// List page to go back to
        #[arg(long, value_parser = page_arg)]
        page: Option<usize>,
    },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    speciality: Option<String>,
    #[arg(long)]
    clinic: Option<String>,
    /// A single letter, or "all"
    #[arg(long)]
    letter: Option<String>,
    #[arg(long, value_parser = page_arg)]
    page: Option<usize>,
    #[arg(long, conflicts_with = "all")]
    page_size: Option<usize>,
    /// Show every match on one page
    #[arg(long)]
    all: bool,
}

fn page_arg(raw: &str) -> Result<usize, String> {
    parse_page(raw).map_err(|e| e.to_string())
}

impl ListArgs {
    fn into_query(self) -> anyhow::Result<DirectoryQuery> {
        let page_size = match (self.all, self.page_size) {
            (true, _) => Some(PageSize::All),
            (false, Some(size)) => Some(PageSize::fixed(size)?),
            (false, None) => None,
        };

        Ok(DirectoryQuery {
            name: self.name,
            speciality: self.speciality,
            clinic_name: self.clinic,
            letter: self.letter.as_deref().map(parse_letter_choice).transpose()?,
            page: self.page,
            page_size,
        })
    }
}

/// Resolves the `show` target. An explicit `--page` wins over the route's page.
fn detail_route(target: String, page: Option<usize>) -> anyhow::Result<DetailRoute> {
    let mut route = if target.starts_with('/') {
        DetailRoute::parse(&target)?
    } else {
        DetailRoute {
            id: target,
            page: None,
        }
    };
    route.page = page.or(route.page);
    Ok(route)
}

fn repository(
    cfg: &CoreConfig,
    file: Option<PathBuf>,
) -> anyhow::Result<Box<dyn DoctorRepository>> {
    Ok(match file {
        Some(path) => Box::new(JsonFileRepository::new(path)),
        None => Box::new(HttpDoctorRepository::new(cfg)?),
    })
}

fn print_card(card: &DoctorCard) {
    println!(
        "{:<8} {:<28} {:<20} {}",
        card.id,
        card.display_name,
        card.speciality.as_deref().unwrap_or("-"),
        card.clinic_name.as_deref().unwrap_or("-")
    );
}

fn print_detail(detail: &DoctorDetail) {
    println!("{}", detail.name);
    if let Some(speciality) = &detail.speciality {
        println!("Speciality: {}", speciality);
    }
    if let Some(clinic) = &detail.clinic_name {
        println!("Clinic: {}", clinic);
    }
    if !detail.address_lines.is_empty() {
        println!("Address:");
        for line in &detail.address_lines {
            println!("  {}", line);
        }
    }
    if let Some(email) = &detail.email {
        println!("Email: {}", email);
    }
    println!("Image: {}", detail.image_url);
    println!();
    println!("{}", detail.more_info);
    println!();
    println!("Back: {}", detail.back_link);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mib_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = CoreConfig::from_env_values(
        cli.source.or_else(|| std::env::var("MIB_DOCTORS_URL").ok()),
        std::env::var("MIB_PAGE_SIZE").ok(),
        std::env::var("MIB_IMAGE_BASE").ok(),
        std::env::var("MIB_PLACEHOLDER_IMAGE").ok(),
        std::env::var("MIB_HTTP_TIMEOUT_SECS").ok(),
    )?;
    let repository = repository(&cfg, cli.file)?;

    match cli.command {
        Some(Commands::List(args)) => {
            let query = args.into_query()?;
            let mut directory = DirectoryState::new(cfg.default_page_size());
            directory.load(repository.list_doctors().await?);
            directory.apply_query(query)?;

            let bar: Vec<String> = alphabet_bar(directory.letter())
                .into_iter()
                .map(|(label, selected)| {
                    if selected {
                        format!("[{label}]")
                    } else {
                        label
                    }
                })
                .collect();
            println!("{}", bar.join(" "));

            let view = directory.view();
            if view.doctors.is_empty() {
                println!("No doctors found.");
            } else {
                for doctor in &view.doctors {
                    print_card(&DoctorCard::new(doctor, &cfg, view.page));
                }
            }
            println!(
                "Page {} of {} ({} matching)",
                view.page, view.total_pages, view.total_matches
            );
        }
        Some(Commands::Suggest { field, partial }) => {
            let doctors = repository.list_doctors().await?;
            let suggestions = mib_core::suggest(&doctors, field, &partial);
            if suggestions.is_empty() {
                println!("No suggestions for {} {:?}.", field, partial);
            } else {
                for value in suggestions {
                    println!("{}", value);
                }
            }
        }
        Some(Commands::Show { target, page }) => {
            let route = detail_route(target, page)?;
            match repository.get_doctor(&route.id).await {
                Ok(doctor) => print_detail(&DoctorDetail::new(&doctor, &cfg, route.page)),
                Err(e) if e.is_not_found() => eprintln!("No doctor with id {}", route.id),
                Err(e) => return Err(e.into()),
            }
        }
        None => {
            println!("Use 'mib --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_query(args: &[&str]) -> anyhow::Result<DirectoryQuery> {
        let cli = Cli::try_parse_from(["mib", "list"].iter().chain(args))?;
        match cli.command {
            Some(Commands::List(list)) => list.into_query(),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn list_flags_map_to_query() {
        let query = list_query(&[
            "--name", "jane", "--speciality", "cardio", "--clinic", "harbour", "--page", "2",
            "--page-size", "4",
        ])
        .unwrap();

        assert_eq!(query.name.as_deref(), Some("jane"));
        assert_eq!(query.speciality.as_deref(), Some("cardio"));
        assert_eq!(query.clinic_name.as_deref(), Some("harbour"));
        assert_eq!(query.page, Some(2));
        assert_eq!(query.page_size, Some(PageSize::fixed(4).unwrap()));
        assert_eq!(query.letter, None);
    }

    #[test]
    fn all_shows_one_page_and_conflicts_with_page_size() {
        let query = list_query(&["--all"]).unwrap();
        assert_eq!(query.page_size, Some(PageSize::All));

        assert!(list_query(&["--all", "--page-size", "4"]).is_err());
    }

    #[test]
    fn letter_all_clears_the_letter() {
        assert_eq!(list_query(&["--letter", "all"]).unwrap().letter, Some(None));

        let letter = list_query(&["--letter", "k"]).unwrap().letter;
        assert_eq!(letter.flatten().map(|l| l.as_char()), Some('K'));

        assert!(list_query(&["--letter", "kk"]).is_err());
    }

    #[test]
    fn zero_page_and_page_size_are_rejected() {
        assert!(list_query(&["--page", "0"]).is_err());
        assert!(list_query(&["--page-size", "0"]).is_err());
    }

    #[test]
    fn show_accepts_id_or_route() {
        let route = detail_route("12".into(), None).unwrap();
        assert_eq!((route.id.as_str(), route.page), ("12", None));

        let route = detail_route("/doctor/a%20b?page=3".into(), None).unwrap();
        assert_eq!((route.id.as_str(), route.page), ("a b", Some(3)));

        let route = detail_route("/doctor/12?page=3".into(), Some(5)).unwrap();
        assert_eq!(route.page, Some(5));

        assert!(detail_route("/doctors/12".into(), None).is_err());
    }
}

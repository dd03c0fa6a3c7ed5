// pesan/app/src/commands.rs

//! Subcommands of the `pesan` binary and their argument parsing.

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::terminal::{TerminalNavigator, TerminalNotifier};
use chrono::NaiveDate;
use pesan::account::{
  activity_log_page, approved_testimonials, load_profile, profile_update_error_message, register,
  registration_error_message, update_profile,
};
use pesan::api::LogScope;
use pesan::catalog::{image_url, region_label, team_members, DestinationBrowser};
use pesan::format::format_idr;
use pesan::gate::summary_lines;
use pesan::model::{AvatarUpload, FieldValue, ProfileUpdate, RegisterRequest};
use pesan::payment::{payment_error_message, resume_payment};
use pesan::search::{location_label, SearchForm};
use pesan::tickets::{download_ticket_pdf, ticket_detail, StatusFilter, TicketList};
use pesan::{CheckoutOutcome, CheckoutPage, Credential, HttpBackend, OrderPaymentSequencer, PageState, SubmitOutcome};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

pub const USAGE: &str = "\
usage: pesan <command> [args]

  checkout <destination-id> <pickup-id> <YYYY-MM-DD> <depart HH:MM> <return HH:MM> <quantity> [--yes]
  tickets [page] [--status <label>] [--search <text>]
  ticket <order-id> [--pdf]
  pay <reference>
  destinations [category]
  search [--category <id>] [--area <id>]
  location [<latitude> <longitude>]
  team
  register <name> <email> <phone>          (password is read from stdin)
  profile
  profile-update <user-id> [--name <name>] [--phone <phone>] [--avatar <file>]
  logs [admin|own] [page]
  testimonials [page]";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
  Checkout {
    destination_id: i64,
    pickup_location_id: i64,
    date: NaiveDate,
    depart_time: String,
    return_time: String,
    quantity: u8,
    assume_yes: bool,
  },
  Tickets {
    page: u32,
    status: StatusFilter,
    search: String,
  },
  Ticket {
    order_id: i64,
    pdf: bool,
  },
  Pay {
    reference: String,
  },
  Destinations {
    category: Option<String>,
  },
  Search {
    category: Option<i64>,
    area: Option<i64>,
  },
  Location {
    position: Option<(f64, f64)>,
  },
  Team,
  Register {
    name: String,
    email: String,
    phone: String,
  },
  Profile,
  ProfileUpdate {
    user_id: i64,
    name: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
  },
  Logs {
    scope: LogScope,
    page: u32,
  },
  Testimonials {
    page: u32,
  },
}

fn usage(msg: impl Into<String>) -> AppError {
  AppError::Usage(format!("{}\n\n{}", msg.into(), USAGE))
}

fn number<T: std::str::FromStr>(value: Option<&String>, what: &str) -> Result<T> {
  let raw = value.ok_or_else(|| usage(format!("missing {what}")))?;
  raw
    .parse::<T>()
    .map_err(|_| usage(format!("invalid {what}: '{raw}'")))
}

fn optional_number<T: std::str::FromStr>(value: Option<String>, what: &str) -> Result<Option<T>> {
  value.as_ref().map(|_| number(value.as_ref(), what)).transpose()
}

fn page_arg(value: Option<&String>) -> Result<u32> {
  match value {
    Some(_) => number(value, "page"),
    None => Ok(1),
  }
}

impl Command {
  pub fn parse(args: &[String]) -> Result<Self> {
    let (name, rest) = args.split_first().ok_or_else(|| usage("missing command"))?;
    let flag = |f: &str| rest.iter().any(|a| a == f);
    let option = |f: &str| {
      rest
        .iter()
        .position(|a| a == f)
        .and_then(|i| rest.get(i + 1))
        .cloned()
    };
    let positional: Vec<&String> = {
      let mut out = Vec::new();
      let mut iter = rest.iter();
      while let Some(arg) = iter.next() {
        match arg.as_str() {
          "--status" | "--search" | "--category" | "--area" | "--name" | "--phone" | "--avatar" => {
            iter.next();
          }
          a if a.starts_with("--") => {}
          _ => out.push(arg),
        }
      }
      out
    };
    let pos = |i: usize| positional.get(i).copied();

    match name.as_str() {
      "checkout" => {
        let date_raw = pos(2).ok_or_else(|| usage("missing date"))?;
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
          .map_err(|_| usage(format!("invalid date: '{date_raw}'")))?;
        Ok(Command::Checkout {
          destination_id: number(pos(0), "destination id")?,
          pickup_location_id: number(pos(1), "pickup id")?,
          date,
          depart_time: pos(3).cloned().ok_or_else(|| usage("missing depart time"))?,
          return_time: pos(4).cloned().ok_or_else(|| usage("missing return time"))?,
          quantity: number(pos(5), "quantity")?,
          assume_yes: flag("--yes"),
        })
      }
      "tickets" => Ok(Command::Tickets {
        page: page_arg(pos(0))?,
        status: option("--status").map_or(StatusFilter::All, |l| StatusFilter::from_label(&l)),
        search: option("--search").unwrap_or_default(),
      }),
      "ticket" => Ok(Command::Ticket {
        order_id: number(pos(0), "order id")?,
        pdf: flag("--pdf"),
      }),
      "pay" => Ok(Command::Pay {
        reference: pos(0).cloned().ok_or_else(|| usage("missing reference"))?,
      }),
      "destinations" => Ok(Command::Destinations {
        category: pos(0).cloned(),
      }),
      "search" => Ok(Command::Search {
        category: optional_number(option("--category"), "category id")?,
        area: optional_number(option("--area"), "area id")?,
      }),
      "location" => {
        let position = match (pos(0), pos(1)) {
          (Some(_), Some(_)) => Some((number(pos(0), "latitude")?, number(pos(1), "longitude")?)),
          (None, None) => None,
          _ => return Err(usage("location needs both latitude and longitude")),
        };
        Ok(Command::Location { position })
      }
      "team" => Ok(Command::Team),
      "register" => Ok(Command::Register {
        name: pos(0).cloned().ok_or_else(|| usage("missing name"))?,
        email: pos(1).cloned().ok_or_else(|| usage("missing email"))?,
        phone: pos(2).cloned().ok_or_else(|| usage("missing phone"))?,
      }),
      "profile" => Ok(Command::Profile),
      "profile-update" => Ok(Command::ProfileUpdate {
        user_id: number(pos(0), "user id")?,
        name: option("--name"),
        phone: option("--phone"),
        avatar: option("--avatar"),
      }),
      "logs" => {
        let (scope, page) = match pos(0).map(String::as_str) {
          Some("admin") => (LogScope::Admin, pos(1)),
          Some("own") => (LogScope::Own, pos(1)),
          _ => (LogScope::Own, pos(0)),
        };
        Ok(Command::Logs {
          scope,
          page: page_arg(page)?,
        })
      }
      "testimonials" => Ok(Command::Testimonials {
        page: page_arg(pos(0))?,
      }),
      other => Err(usage(format!("unknown command '{other}'"))),
    }
  }
}

fn require_login(config: &AppConfig) -> Result<&Credential> {
  config.credential.as_ref().ok_or(AppError::LoginRequired)
}

fn read_password() -> Result<String> {
  eprint!("Password: ");
  io::stderr().flush()?;
  let mut password = String::new();
  io::stdin().lock().read_line(&mut password)?;
  Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

fn read_avatar(path: &str) -> Result<AvatarUpload> {
  let bytes = std::fs::read(path)?;
  let file_name = std::path::Path::new(path)
    .file_name()
    .map_or_else(|| "avatar".to_string(), |n| n.to_string_lossy().into_owned());
  Ok(AvatarUpload { file_name, bytes })
}

fn ask_confirmation() -> Result<bool> {
  print!("Lanjutkan pemesanan? [y/N] ");
  io::stdout().flush()?;
  let mut answer = String::new();
  io::stdin().lock().read_line(&mut answer)?;
  Ok(matches!(answer.trim(), "y" | "Y" | "ya" | "yes"))
}

pub async fn run(command: Command, config: &AppConfig, backend: Arc<HttpBackend>) -> Result<()> {
  match command {
    Command::Checkout {
      destination_id,
      pickup_location_id,
      date,
      depart_time,
      return_time,
      quantity,
      assume_yes,
    } => {
      let navigator = Arc::new(TerminalNavigator::default());
      let sequencer = Arc::new(OrderPaymentSequencer::new(
        backend.clone(),
        navigator.clone(),
        Arc::new(TerminalNotifier),
      ));
      let mut page = CheckoutPage::new(Some(destination_id), sequencer, config.credential.clone());
      if page.mount(backend.as_ref()).await == PageState::NotFound {
        println!("{}", pesan::checkout::DESTINATION_NOT_FOUND);
        return Ok(());
      }

      page.update_field(FieldValue::PickupLocation(Some(pickup_location_id)));
      page.update_field(FieldValue::Date(Some(date)));
      page.update_field(FieldValue::DepartTime(Some(depart_time)));
      page.update_field(FieldValue::ReturnTime(Some(return_time)));
      page.update_field(FieldValue::Quantity(quantity));

      match page.submit() {
        SubmitOutcome::Invalid => {
          for (field, message) in page.form().errors() {
            println!("{field}: {message}");
          }
        }
        SubmitOutcome::LoginRequired { login_url } => {
          println!("Silakan masuk terlebih dahulu: {login_url}");
        }
        SubmitOutcome::Unavailable => println!("{}", pesan::checkout::DESTINATION_NOT_FOUND),
        SubmitOutcome::Confirming(confirmed) => {
          for (label, value) in summary_lines(&confirmed) {
            println!("{label:<15} {value}");
          }
          if !assume_yes && !ask_confirmation()? {
            page.cancel();
            println!("Dibatalkan.");
            return Ok(());
          }
          match page.confirm().await {
            Some(CheckoutOutcome::Redirected { order_id, .. }) => {
              tracing::info!(order_id, "Checkout handed over to the payment gateway.");
            }
            Some(CheckoutOutcome::Failed) => {
              page.dismiss_error();
              return Err(AppError::CheckoutFailed);
            }
            Some(CheckoutOutcome::AlreadyInProgress) | None => {}
          }
        }
      }
      Ok(())
    }

    Command::Tickets { page, status, search } => {
      let mut list = TicketList::new(config.tickets_page_limit);
      list.set_status(status);
      list.set_text(search);
      list.load(backend.as_ref(), config.credential.as_ref(), page).await;
      for ticket in list.visible() {
        println!(
          "#{:<6} {:<14} {:<30} {:<12} {}",
          ticket.id,
          ticket.ticket_code,
          ticket.destination_name,
          ticket.date,
          ticket.payment_status.label()
        );
      }
      println!("Halaman {} dari {}", list.page(), list.total_pages());
      Ok(())
    }

    Command::Ticket { order_id, pdf } => {
      let credential = require_login(config)?;
      let detail = ticket_detail(backend.as_ref(), credential, order_id).await?;
      println!("{}", serde_json::to_string_pretty(&detail)?);
      if pdf {
        let file = download_ticket_pdf(backend.as_ref(), credential, order_id, &detail).await?;
        std::fs::write(&file.file_name, &file.bytes)?;
        println!("Tersimpan: {}", file.file_name);
      }
      Ok(())
    }

    Command::Pay { reference } => {
      let credential = require_login(config)?;
      match resume_payment(backend.as_ref(), credential, &reference).await {
        Ok(url) => {
          println!("Bayar Sekarang: {url}");
          Ok(())
        }
        Err(e) => Err(AppError::Rejected {
          message: payment_error_message(&e),
          source: e,
        }),
      }
    }

    Command::Destinations { category } => {
      let mut browser = DestinationBrowser::new();
      browser.load(backend.as_ref()).await;
      if let Some(category) = category {
        if !browser.select_category(&category) {
          return Err(AppError::Usage(format!("unknown category '{category}'")));
        }
      }
      let tabs: Vec<&str> = browser.categories().iter().map(|c| c.name.as_str()).collect();
      println!("Kategori: {}", tabs.join(" | "));
      if let Some(message) = browser.empty_message() {
        println!("{message}");
      }
      for d in browser.visible() {
        println!(
          "#{:<4} {:<30} {:<22} {:>14}  {}",
          d.id,
          d.name,
          region_label(d),
          format_idr(d.price),
          image_url(d)
        );
      }
      Ok(())
    }

    Command::Search { category, area } => {
      let mut form = SearchForm::new();
      form.load(backend.as_ref()).await;
      if let Some(id) = category {
        if !form.select_category(id) {
          return Err(AppError::Usage(format!("unknown category id {id}")));
        }
      }
      if let Some(id) = area {
        if !form.select_region(id) {
          return Err(AppError::Usage(format!("unknown area id {id}")));
        }
      }
      let path = form.search_path().map_err(|message| AppError::Usage(message.to_string()))?;
      println!("{path}");
      Ok(())
    }

    Command::Location { position } => {
      let geocoder = HttpBackend::new(&config.geocoder_config())?;
      println!("Lokasi Kamu: {}", location_label(&geocoder, position).await);
      Ok(())
    }

    Command::Team => {
      for member in team_members(backend.as_ref()).await? {
        println!("{:<24} {}", member.name, member.job);
      }
      Ok(())
    }

    Command::Register { name, email, phone } => {
      let password = read_password()?;
      let request = RegisterRequest::new(name, email, password, phone);
      match register(backend.as_ref(), &request).await {
        Ok(()) => {
          println!("Pendaftaran berhasil. Silakan masuk.");
          Ok(())
        }
        Err(e) => Err(AppError::Rejected {
          message: registration_error_message(&e),
          source: e,
        }),
      }
    }

    Command::ProfileUpdate {
      user_id,
      name,
      phone,
      avatar,
    } => {
      let credential = require_login(config)?;
      let avatar = avatar.as_deref().map(read_avatar).transpose()?;
      let update = ProfileUpdate::new(name, phone, avatar);
      match update_profile(backend.as_ref(), credential, user_id, &update, backend.base_url()).await {
        Ok(profile) => {
          println!("{}", serde_json::to_string_pretty(&profile)?);
          Ok(())
        }
        Err(e) => Err(AppError::Rejected {
          message: profile_update_error_message(&e),
          source: e,
        }),
      }
    }

    Command::Profile => {
      let credential = require_login(config)?;
      let profile = load_profile(backend.as_ref(), credential, backend.base_url()).await?;
      println!("{}", serde_json::to_string_pretty(&profile)?);
      Ok(())
    }

    Command::Logs { scope, page } => {
      let credential = require_login(config)?;
      let logs = activity_log_page(backend.as_ref(), credential, scope, page, config.log_page_limit).await;
      for item in &logs.items {
        println!("{:<24} {}", item.created_at, item.description);
      }
      println!("Halaman {} dari {}", logs.page, logs.total_pages.max(1));
      Ok(())
    }

    Command::Testimonials { page } => {
      let testimonials = approved_testimonials(backend.as_ref(), page).await?;
      for t in &testimonials.items {
        println!("{} ({}/5): {}", t.name, t.rating, t.message);
      }
      Ok(())
    }
  }
}

use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use fitamin_core::api::{resolve_profile, ProfileSource};
use fitamin_core::auth::{LoginRequest, RegisterRequest};
use fitamin_core::catalog::validate_catalog;
use fitamin_core::recommend::{CategoryFilter, GoalFilter};
use fitamin_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitamin")]
#[command(about = "Personal health and nutrition tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI from height and weight
    Bmi {
        /// Height in cm (50-250)
        #[arg(long)]
        height: f64,

        /// Weight in kg (10-300)
        #[arg(long)]
        weight: f64,

        /// Record the measurement in the BMI history
        #[arg(long)]
        save: bool,

        /// Free-form notes stored with the measurement
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show recorded BMI measurements, newest first
    History {
        /// Show at most this many records
        #[arg(long)]
        limit: Option<usize>,

        /// Export all records to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Estimate basal metabolic rate (Mifflin-St Jeor)
    Bmr {
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        height: f64,

        #[arg(long)]
        age: u32,

        /// male or female
        #[arg(long)]
        sex: String,
    },

    /// Manage the daily meal plan
    Meals {
        #[command(subcommand)]
        action: MealsAction,
    },

    /// Browse food recommendations
    Recommend {
        /// Case-insensitive text matched against name and description
        #[arg(long, default_value = "")]
        search: String,

        /// Food category or "all"
        #[arg(long, default_value = "all")]
        category: String,

        /// Fitness goal or "all"
        #[arg(long, default_value = "all")]
        goal: String,
    },

    /// Today's nutrition progress and BMI
    Dashboard {
        /// Date to summarize (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm: String,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// View or edit the account profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum MealsAction {
    /// List meals and totals for a date
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Add a meal, either from the catalog or entered by hand
    Add {
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Catalog food id
        #[arg(long, conflicts_with = "name")]
        food: Option<String>,

        /// Meal name (manual entry)
        #[arg(long, required_unless_present = "food")]
        name: Option<String>,

        #[arg(long, default_value_t = 1.0)]
        portion: f64,

        /// Nutrients per portion (manual entry)
        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,
    },

    /// Remove a meal by id
    Remove {
        id: String,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile and derived health figures
    Show,

    /// Update profile fields
    Update(ProfileArgs),
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    age: Option<u32>,

    #[arg(long)]
    sex: Option<String>,

    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    weight: Option<f64>,

    #[arg(long)]
    target_weight: Option<f64>,

    #[arg(long)]
    goal: Option<String>,

    #[arg(long)]
    activity: Option<String>,

    #[arg(long)]
    diet: Option<String>,

    #[arg(long)]
    calorie_target: Option<f64>,

    #[arg(long)]
    protein_target: Option<f64>,

    #[arg(long)]
    carbs_target: Option<f64>,

    #[arg(long)]
    fat_target: Option<f64>,
}

impl ProfileArgs {
    fn into_update(self) -> Result<ProfileUpdate> {
        Ok(ProfileUpdate {
            name: self.name,
            age_years: self.age,
            sex: self.sex.as_deref().map(str::parse::<Sex>).transpose()?,
            height_cm: self.height,
            current_weight_kg: self.weight,
            target_weight_kg: self.target_weight,
            fitness_goal: self.goal.as_deref().map(str::parse::<FitnessGoal>).transpose()?,
            activity_level: self.activity.as_deref().map(str::parse::<ActivityLevel>).transpose()?,
            diet_preference: self.diet.as_deref().map(str::parse::<DietPreference>).transpose()?,
            daily_calorie_target: self.calorie_target,
            protein_target_g: self.protein_target,
            carbs_target_g: self.carbs_target,
            fat_target_g: self.fat_target,
        })
    }
}

/// Files under the data directory
struct DataPaths {
    session: PathBuf,
    meal_plans: PathBuf,
    bmi_history: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            session: data_dir.join("session.json"),
            meal_plans: data_dir.join("meal_plans.json"),
            bmi_history: data_dir.join("bmi_history.jsonl"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fitamin_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Commands::Bmi {
            height,
            weight,
            save,
            notes,
        } => cmd_bmi(&paths, height, weight, save, notes),
        Commands::History { limit, export } => cmd_history(&paths, limit, export),
        Commands::Bmr {
            weight,
            height,
            age,
            sex,
        } => cmd_bmr(weight, height, age, &sex),
        Commands::Meals { action } => cmd_meals(&paths, action),
        Commands::Recommend {
            search,
            category,
            goal,
        } => cmd_recommend(&config, search, &category, &goal),
        Commands::Dashboard { date } => cmd_dashboard(&paths, &config, date.unwrap_or_else(today)),
        Commands::Register {
            name,
            email,
            password,
            confirm,
        } => cmd_register(&paths, &config, &name, &email, &password, &confirm).await,
        Commands::Login { email, password } => cmd_login(&paths, &config, &email, &password).await,
        Commands::Logout => cmd_logout(&paths),
        Commands::Profile { action } => match action {
            ProfileAction::Show => cmd_profile_show(&paths, &config).await,
            ProfileAction::Update(args) => cmd_profile_update(&paths, &config, args).await,
        },
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cmd_bmi(paths: &DataPaths, height: f64, weight: f64, save: bool, notes: String) -> Result<()> {
    let body = Anthropometrics::new(height, weight)?;
    let result = body.bmi();

    println!("BMI: {} ({})", result.display_value(), result.category_label);

    if save {
        let record = BmiRecord::new(body, notes, Utc::now());
        let log = BmiLog::new(&paths.bmi_history);
        log.append(&record)?;
        println!("✓ Measurement saved to {}", log.path().display());
    }

    Ok(())
}

fn cmd_history(paths: &DataPaths, limit: Option<usize>, export: Option<PathBuf>) -> Result<()> {
    let log = BmiLog::new(&paths.bmi_history);
    let records = log.history()?;

    if records.is_empty() {
        println!("No BMI measurements recorded yet.");
        return Ok(());
    }

    if let Some(csv_path) = export {
        let count = history::export_csv(&records, &csv_path)?;
        println!("✓ Exported {} measurements to CSV", count);
        println!("  CSV: {}", csv_path.display());
        return Ok(());
    }

    for record in records.iter().take(limit.unwrap_or(usize::MAX)) {
        let bmi = match record.bmi() {
            Ok(bmi) => format!("{} ({})", bmi.display_value(), bmi.category_label),
            Err(_) => "n/a".to_string(),
        };
        print!(
            "{}  {:>6.1} cm  {:>6.1} kg  BMI {}",
            record.recorded_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            record.height_cm,
            record.weight_kg,
            bmi
        );
        if record.notes.is_empty() {
            println!();
        } else {
            println!("  {}", record.notes);
        }
    }

    Ok(())
}

fn cmd_bmr(weight: f64, height: f64, age: u32, sex: &str) -> Result<()> {
    let sex: Sex = sex.parse()?;
    let bmr = compute_bmr(weight, height, age, sex)?;
    println!("BMR: {:.0} kcal/day", bmr);
    Ok(())
}

fn cmd_meals(paths: &DataPaths, action: MealsAction) -> Result<()> {
    match action {
        MealsAction::Show { date } => {
            let date = date.unwrap_or_else(today);
            let book = MealPlanBook::load(&paths.meal_plans)?;
            let meals = book.meals_for(date);

            println!("Meals for {}", date);
            if meals.is_empty() {
                println!("  (no meals planned)");
                return Ok(());
            }
            for meal in meals {
                println!(
                    "  {}  {} ×{}  {:.0} kcal",
                    meal.id,
                    meal.name,
                    meal.portion_multiplier,
                    meal.calories_per_portion * meal.portion_multiplier
                );
            }
            display_totals(&book.totals_for(date));
        }

        MealsAction::Add {
            date,
            food,
            name,
            portion,
            calories,
            protein,
            carbs,
            fat,
        } => {
            let date = date.unwrap_or_else(today);
            let item = match (food, name) {
                (Some(id), _) => find_food(&id)
                    .ok_or_else(|| Error::Validation(format!("no catalog food with id '{}'", id)))?
                    .to_meal_item(portion),
                (None, Some(name)) => MealItem::new(name, portion, calories, protein, carbs, fat),
                (None, None) => {
                    return Err(Error::Validation("either --food or --name is required".into()))
                }
            };

            let (id, name) = (item.id.clone(), item.name.clone());
            MealPlanBook::update(&paths.meal_plans, |book| book.add_meal(date, item))?;
            println!("✓ Added {} to {}", name, date);
            println!("  id: {}", id);
        }

        MealsAction::Remove { id, date } => {
            let date = date.unwrap_or_else(today);
            let removed =
                MealPlanBook::update(&paths.meal_plans, |book| Ok(book.remove_meal(date, &id)))?;
            if removed {
                println!("✓ Removed meal {}", id);
            } else {
                println!("No meal {} on {}", id, date);
            }
        }
    }

    Ok(())
}

fn cmd_recommend(config: &Config, search: String, category: &str, goal: &str) -> Result<()> {
    let catalog = get_default_catalog();
    let errors = validate_catalog(catalog);
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let query = RecommendationQuery {
        text: search,
        category: category.parse::<CategoryFilter>()?,
        goal: goal.parse::<GoalFilter>()?,
    };

    let results = filter(catalog, &query, &config.recommendation);
    if results.is_empty() {
        println!("No foods match your filters.");
        return Ok(());
    }

    for food in results {
        println!();
        println!("  [{}] {} ({})", food.id, food.name, food.category);
        println!(
            "      {:.0} kcal · {:.0} g protein · {:.0} g carbs · {:.0} g fat",
            food.calories, food.protein, food.carbs, food.fat
        );
        println!(
            "      {} · {} min · {}",
            food.difficulty,
            food.cooking_time_minutes,
            food.benefits.join(", ")
        );
    }
    println!();

    Ok(())
}

fn cmd_dashboard(paths: &DataPaths, config: &Config, date: NaiveDate) -> Result<()> {
    let session = Session::load(&paths.session)?;
    let book = MealPlanBook::load(&paths.meal_plans)?;
    let summary = DashboardSummary::build(
        session.user.as_ref(),
        &config.targets.daily_targets(),
        book.meals_for(date),
    );

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DASHBOARD {}", date);
    println!("╰─────────────────────────────────────────╯");
    println!();

    match &summary.bmi {
        Some(bmi) => println!("  BMI: {} ({})", bmi.display_value(), bmi.category_label),
        None => println!("  BMI: complete your profile to see it"),
    }
    println!("  Meals planned: {}", summary.meal_count);
    println!();

    let rows = [
        ("Calories", summary.totals.calories, summary.targets.calories, "kcal", summary.progress.calories),
        ("Protein", summary.totals.protein, summary.targets.protein_g, "g", summary.progress.protein),
        ("Carbs", summary.totals.carbs, summary.targets.carbs_g, "g", summary.progress.carbs),
        ("Fat", summary.totals.fat, summary.targets.fat_g, "g", summary.progress.fat),
    ];
    for (label, current, target, unit, percent) in rows {
        println!(
            "  {:<9} {:>6.0} / {:<6.0} {:<4} {:>3.0}%",
            label, current, target, unit, percent
        );
    }
    println!();

    Ok(())
}

async fn cmd_register(
    paths: &DataPaths,
    config: &Config,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<()> {
    let request = RegisterRequest::validated(name, email, password, confirm)?;
    let response = ApiClient::new(&config.api)?.register(&request).await;
    finish_sign_in(paths, response, "Registration failed")?;
    println!("✓ Account created");
    Ok(())
}

async fn cmd_login(paths: &DataPaths, config: &Config, email: &str, password: &str) -> Result<()> {
    let request = LoginRequest::validated(email, password)?;
    let response = ApiClient::new(&config.api)?.login(&request).await;
    let user = finish_sign_in(paths, response, "Login failed")?;
    match user {
        Some(user) => println!("✓ Logged in as {}", user.name),
        None => println!("✓ Logged in"),
    }
    Ok(())
}

/// Store the token and user from a successful auth response
fn finish_sign_in(
    paths: &DataPaths,
    response: ApiResponse,
    failure: &str,
) -> Result<Option<UserProfile>> {
    let token = match (response.success, response.token.clone()) {
        (true, Some(token)) => token,
        _ => {
            return Err(Error::Other(format!(
                "{}: {}",
                failure,
                response.message_or("no token returned")
            )))
        }
    };

    let mut session = Session::load(&paths.session)?;
    session.sign_in(token, response.user);
    session.save(&paths.session)?;
    tracing::info!("Session stored at {:?}", paths.session);
    Ok(session.user)
}

fn cmd_logout(paths: &DataPaths) -> Result<()> {
    let mut session = Session::load(&paths.session)?;
    session.clear();
    session.save(&paths.session)?;
    println!("✓ Logged out");
    Ok(())
}

async fn cmd_profile_show(paths: &DataPaths, config: &Config) -> Result<()> {
    let mut session = Session::load(&paths.session)?;
    let Some(token) = session.token().map(str::to_owned) else {
        println!("Not logged in. Run `fitamin login` first.");
        return Ok(());
    };

    let response = ApiClient::new(&config.api)?.get_profile(&token).await;
    let profile = match resolve_profile(response, session.user.as_ref()) {
        ProfileSource::Remote(profile) => {
            session.user = Some(profile.clone());
            session.save(&paths.session)?;
            profile
        }
        ProfileSource::Cached { profile, reason } => {
            println!("⚠ Showing cached profile ({})", reason);
            profile
        }
        ProfileSource::Unavailable(reason) => {
            return Err(Error::Other(format!("Profile unavailable: {}", reason)))
        }
    };

    display_profile(&profile, config);
    Ok(())
}

async fn cmd_profile_update(paths: &DataPaths, config: &Config, args: ProfileArgs) -> Result<()> {
    let update = args.into_update()?;
    if update.is_empty() {
        return Err(Error::Validation("nothing to update".into()));
    }
    update.validate()?;

    let mut session = Session::load(&paths.session)?;
    let Some(token) = session.token().map(str::to_owned) else {
        println!("Not logged in. Run `fitamin login` first.");
        return Ok(());
    };

    let response = ApiClient::new(&config.api)?
        .update_profile(&token, &update)
        .await;
    if !response.success {
        return Err(Error::Other(format!(
            "Profile update failed: {}",
            response.message_or("unknown error")
        )));
    }

    let profile = match response.user {
        Some(user) => user,
        None => {
            let mut cached = session.user.clone().unwrap_or_default();
            cached.apply(&update);
            cached
        }
    };
    session.user = Some(profile.clone());
    session.save(&paths.session)?;

    println!("✓ Profile updated");
    display_profile(&profile, config);
    Ok(())
}

fn display_profile(profile: &UserProfile, config: &Config) {
    let summary = HealthSummary::for_profile(profile, &config.targets.daily_targets());

    println!();
    println!("  {} <{}>", profile.name, profile.email);
    if let Some(age) = profile.age_years {
        println!("  Age: {}", age);
    }
    if let Some(sex) = profile.sex {
        println!("  Sex: {}", sex);
    }
    if let Some(height) = profile.height_cm {
        println!("  Height: {:.1} cm", height);
    }
    if let Some(weight) = profile.current_weight_kg {
        println!("  Weight: {:.1} kg", weight);
    }
    if let Some(target) = profile.target_weight_kg {
        println!("  Target weight: {:.1} kg", target);
    }
    if let Ok(remaining) = profile.weight_to_target() {
        println!("  To target: {:.1} kg", remaining.abs());
    }
    if let Some(goal) = profile.fitness_goal {
        println!("  Goal: {}", goal);
    }
    if let Some(activity) = profile.activity_level {
        println!("  Activity: {}", activity);
    }
    if let Some(diet) = profile.diet_preference {
        println!("  Diet: {}", diet);
    }
    if let Some(joined) = &profile.created_at {
        println!("  Member since: {}", joined);
    }
    println!();

    match &summary.bmi {
        Some(bmi) => println!("  BMI: {} ({})", bmi.display_value(), bmi.category_label),
        None => println!("  BMI: add height and weight to calculate"),
    }
    if let Some(bmr) = summary.bmr {
        println!("  BMR: {:.0} kcal/day", bmr);
    }
    println!(
        "  Targets: {:.0} kcal · {:.0} g protein · {:.0} g carbs · {:.0} g fat",
        summary.targets.calories,
        summary.targets.protein_g,
        summary.targets.carbs_g,
        summary.targets.fat_g
    );
    println!();
}

fn display_totals(totals: &NutritionTotals) {
    println!(
        "  Total: {:.0} kcal · {:.1} g protein · {:.1} g carbs · {:.1} g fat",
        totals.calories, totals.protein, totals.carbs, totals.fat
    );
}

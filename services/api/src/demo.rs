use crate::infra::{
    demo_wardrobe, read_json_file, InMemoryHistoryRepository, InMemoryProfileRepository,
    InMemoryWardrobeRepository, DEMO_USER,
};
use clap::Args;
use outfit_ai::config::RecommendationSettings;
use outfit_ai::error::AppError;
use outfit_ai::recommendation::ranker::{DEFAULT_LIMIT, MAX_LIMIT};
use outfit_ai::recommendation::{
    FeedbackKind, GapSuggestion, RecommendationContext, RecommendationEngine,
    RecommendationRequest, RecommendationService, ScoredOutfit,
};
use outfit_ai::wardrobe::{ClothingItem, Occasion, Season, UserProfile, Weather};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// JSON file holding an array of clothing items
    #[arg(long)]
    pub(crate) wardrobe: PathBuf,
    /// Optional JSON file holding the user's preference profile
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Occasion label, e.g. 工作 or 约会 (defaults to 日常)
    #[arg(long)]
    pub(crate) occasion: Option<String>,
    /// Weather label, e.g. 晴天 or 雨天 (defaults to 晴天)
    #[arg(long)]
    pub(crate) weather: Option<String>,
    /// Season label, e.g. 春季 or 通用 (defaults to 春季)
    #[arg(long)]
    pub(crate) season: Option<String>,
    /// Number of outfits to print (1-20)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Seed for reproducible shoe and accessory picks
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct GapsArgs {
    /// JSON file holding an array of clothing items
    #[arg(long)]
    pub(crate) wardrobe: PathBuf,
    /// Optional JSON file holding the user's preference profile
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Occasion label used for the demo request (defaults to 工作)
    #[arg(long)]
    pub(crate) occasion: Option<String>,
    /// Seed for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        wardrobe,
        profile,
        occasion,
        weather,
        season,
        limit,
        seed,
    } = args;

    let items: Vec<ClothingItem> = read_json_file(&wardrobe)?;
    let profile: Option<UserProfile> = profile.map(|path| read_json_file(&path)).transpose()?;
    let context = RecommendationContext::new(
        occasion.map(|label| Occasion::from_label(&label)).unwrap_or_default(),
        weather.map(|label| Weather::from_label(&label)).unwrap_or_default(),
        season.map(|label| Season::from_label(&label)).unwrap_or_default(),
    );
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let engine = RecommendationEngine::default();
    let outfits = match seed {
        Some(seed) => engine.try_recommend(
            &items,
            profile.as_ref(),
            &context,
            limit,
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => engine.try_recommend(
            &items,
            profile.as_ref(),
            &context,
            limit,
            &mut rand::thread_rng(),
        )?,
    };

    println!(
        "Outfit recommendations ({} | {} | {})",
        context.occasion, context.weather, context.season
    );
    println!("- {} wardrobe items", items.len());
    render_outfits(&outfits);
    Ok(())
}

pub(crate) fn run_gaps(args: GapsArgs) -> Result<(), AppError> {
    let items: Vec<ClothingItem> = read_json_file(&args.wardrobe)?;
    let profile: Option<UserProfile> = args
        .profile
        .map(|path| read_json_file(&path))
        .transpose()?;

    let suggestions = RecommendationEngine::default().analyze_gaps(&items, profile.as_ref());
    println!("Wardrobe gap analysis ({} items)", items.len());
    render_gaps(&suggestions);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let occasion = args
        .occasion
        .map(|label| Occasion::from_label(&label))
        .unwrap_or(Occasion::Work);

    let service = RecommendationService::new(
        Arc::new(InMemoryWardrobeRepository::with_demo_user()),
        Arc::new(InMemoryProfileRepository::default()),
        Arc::new(InMemoryHistoryRepository::default()),
        RecommendationSettings {
            default_limit: 3,
            seed: Some(args.seed.unwrap_or(7)),
        },
    );

    println!("Outfit recommendation demo");
    println!("- {} items in the sample wardrobe", demo_wardrobe().len());

    let response = service.recommend(
        DEMO_USER,
        RecommendationRequest {
            occasion: Some(occasion),
            season: Some(Season::Universal),
            ..RecommendationRequest::default()
        },
    )?;
    println!(
        "\nRequest: {} | {} | {}",
        response.context.occasion, response.context.weather, response.context.season
    );
    println!(
        "Summary: {} (confidence {:.2})",
        response.rationale, response.confidence
    );
    render_outfits(&response.outfits);

    let record = service.save_history(DEMO_USER, &response)?;
    let record = service.record_feedback(
        DEMO_USER,
        record.id,
        FeedbackKind::Liked,
        Some("demo feedback".to_string()),
    )?;
    println!("\nHistory");
    for entry in service.load_history(DEMO_USER, 10)? {
        println!(
            "  - #{} {} items | {:.2} | feedback: {}",
            entry.id.0,
            entry.item_ids.len(),
            entry.confidence,
            entry
                .feedback
                .as_ref()
                .map(|feedback| format!("{:?}", feedback.kind))
                .unwrap_or_else(|| "none".to_string())
        );
    }
    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("  Stored record payload:\n{}", json),
        Err(err) => println!("  Stored record payload unavailable: {}", err),
    }

    println!("\nWardrobe gap analysis");
    render_gaps(&service.wardrobe_gaps(DEMO_USER)?);

    let analysis = service.profile_analysis(DEMO_USER)?;
    println!("\nProfile analysis");
    println!(
        "  {} ({:?}) | {} | {}",
        analysis.basic_info.age,
        analysis.basic_info.age_group,
        analysis.basic_info.body_type,
        analysis.basic_info.skin_tone
    );
    for tip in &analysis.body_recommendations.styling_tips {
        println!("  - {}", tip);
    }
    for suggestion in &analysis.shopping_suggestions {
        println!("  - [{:?}] {} {}", suggestion.priority, suggestion.item, suggestion.reason);
    }

    Ok(())
}

fn render_outfits(outfits: &[ScoredOutfit]) {
    if outfits.is_empty() {
        println!("No suitable outfit found; add more clothing.");
        return;
    }

    for (rank, outfit) in outfits.iter().enumerate() {
        let names: Vec<String> = outfit.items.iter().map(item_label).collect();
        println!(
            "{}. {:.2} | {} | {}",
            rank + 1,
            outfit.confidence,
            outfit.style_analysis.formality_level.label(),
            names.join(" + ")
        );
        println!("   {}", outfit.reasoning);
        let components: Vec<String> = outfit
            .components
            .iter()
            .map(|component| format!("{:?}={:.2}", component.strategy, component.score))
            .collect();
        println!("   [{}]", components.join(", "));
    }
}

fn render_gaps(suggestions: &[GapSuggestion]) {
    if suggestions.is_empty() {
        println!("  No gaps detected.");
        return;
    }

    for suggestion in suggestions {
        println!(
            "  - [{:?}] {} ({}) {}",
            suggestion.priority, suggestion.item, suggestion.category, suggestion.reason
        );
    }
}

fn item_label(item: &ClothingItem) -> String {
    if item.name.is_empty() {
        format!("{}{}", item.color, item.category)
    } else {
        item.name.clone()
    }
}

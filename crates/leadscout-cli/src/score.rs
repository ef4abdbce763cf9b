use leadscout_core::CompetitorRecord;

/// Parses `name:rating:reviews`. The name may itself contain colons.
pub(crate) fn parse_competitor(arg: &str) -> Result<CompetitorRecord, String> {
    let mut parts = arg.rsplitn(3, ':');
    let (Some(reviews), Some(rating), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected name:rating:reviews, got '{arg}'"));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("competitor name is empty in '{arg}'"));
    }
    let rating: f64 = rating
        .trim()
        .parse()
        .map_err(|e| format!("invalid rating '{rating}': {e}"))?;
    if !(0.0..=5.0).contains(&rating) {
        return Err(format!("rating {rating} is outside 0-5"));
    }
    let review_count: u32 = reviews
        .trim()
        .parse()
        .map_err(|e| format!("invalid review count '{reviews}': {e}"))?;

    Ok(CompetitorRecord {
        name: name.to_owned(),
        rating,
        review_count,
        distance_meters: 0.0,
        place_id: None,
        gathered_for: None,
    })
}

pub(crate) fn run_score(
    rating: f64,
    reviews: u32,
    competitors: &[CompetitorRecord],
) -> anyhow::Result<()> {
    if !(0.0..=5.0).contains(&rating) {
        anyhow::bail!("rating {rating} is outside 0-5");
    }
    let assessment = leadscout_scoring::assess(rating, reviews, competitors);
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

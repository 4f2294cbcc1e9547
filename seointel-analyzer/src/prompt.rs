use crate::input::AnalysisInput;

/// Build the single instruction sent to the model for one audit.
pub fn build_prompt(input: &AnalysisInput) -> String {
    format!(
        r#"Perform a comprehensive SEO audit for the URL: {url}.
Context:
- Target Location: {location}
- Industry/Niche: {industry}

Tasks:
1. Technical Audit: Research domain age, authority, indexing, Core Web Vitals, speed, and mobile friendliness.
2. On-Page Analysis: Check titles, meta tags, heading structure, and schema.
3. Content Analysis: Evaluate originality, topical authority, and find content gaps.
4. Off-Page Analysis: Find a detailed list of identified backlinks. Include Source URL, Anchor Text, estimated DR/Authority, and dofollow/nofollow status.
5. Competitive Intel: Identify top 5 organic competitors and compare authority.
6. Keyword Strategy: Find ranking keywords and high-intent opportunities.
   Include metrics: Volume, Difficulty (0-100), Competition (0-100), and CPC (USD).
7. Provide prioritized recommendations (Critical, Medium, Low) and a 3-6 month roadmap.

USE GOOGLE SEARCH to find actual data about this site's visibility, backlink profile (link: operator or mentions), and competition.
If specific real-time metrics are unavailable, provide logical AI-inferred estimations based on similar site archetypes and search footprints.
Return the output in the requested JSON format."#,
        url = input.url.trim(),
        location = input.location_or_default(),
        industry = input.industry_or_default(),
    )
}

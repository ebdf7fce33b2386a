// Prompt templates for the AI adapter. Placeholders in `{braces}` are
// replaced before sending.

pub const SUMMARIZE_PERSONA: &str = "You are an expert resume writer who condenses a \
    candidate's background into a short professional summary.";

pub const SUMMARIZE_PROMPT_TEMPLATE: &str = r#"Write a professional summary for the resume below.

Name: {name}
Skills: {skills}
Education: {education}
Experience: {experience}

{no_fabrication}

Return a JSON object with this EXACT schema:
{"summary": "string"}

RULES:
1. 2 to 4 sentences, third person implied (no "I"), no name repetition.
2. Lead with the strongest experience, then the most relevant skills.
3. Return ONLY the JSON object."#;

pub const SUGGEST_PERSONA: &str = "You are an AI resume expert who knows what hiring \
    managers look for in each role and industry.";

pub const SUGGEST_PROMPT_TEMPLATE: &str = r#"Suggest resume content for the following target role.

Job Title: {job_title}
Industry: {industry}

Return a JSON object with this EXACT schema:
{
  "skills": ["string"],
  "education": ["string"],
  "experience": ["string"]
}

RULES:
1. 5 to 10 skills, most relevant first.
2. 2 to 4 education suggestions (degrees, certificates, courses).
3. 3 to 6 experience bullet ideas starting with a strong action verb.
4. Return ONLY the JSON object."#;

pub const IMPORT_PERSONA: &str = "You are a world-class professional resume editor and \
    career consultant.";

pub const IMPORT_PROMPT_TEMPLATE: &str = r#"Analyze, enhance and structure the resume text below.

INSTRUCTIONS:
1. Analyze and enhance: fix grammar and spelling, rewrite vague descriptions with strong
   action verbs and quantified outcomes where the text supports them, keep the tone
   professional and ATS-friendly.
2. Preserve details: keep all personal information (name, contact details, links) exactly
   as provided.
3. Extract and structure the improved content into the JSON schema below.
   - One object per entry in every array.
   - For experience "description", use one bullet per line, e.g. "• Achievement 1\n• Achievement 2".
4. Produce a clean, well-formatted plain-text version of the whole enhanced resume.

{no_fabrication}

RESUME TEXT:
```
{resume_text}
```

Return a JSON object with this EXACT schema (omit any field the resume does not contain):
{
  "improved_text": "string",
  "json_data": {
    "name": "string",
    "email": "string",
    "phone": "string",
    "website": "string",
    "linkedin": "string",
    "summary": "string",
    "skills": [{"value": "string"}],
    "experience": [{"title": "string", "company": "string", "dates": "string", "description": "string"}],
    "education": [{"degree": "string", "institution": "string", "dates": "string"}],
    "certifications": [{"name": "string", "source": "string"}],
    "projects": [{"name": "string", "description": "string", "url": "string"}],
    "achievements": [{"value": "string"}],
    "publications": [{"title": "string", "url": "string"}]
  }
}"#;

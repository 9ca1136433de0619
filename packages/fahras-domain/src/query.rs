/// Query forms derived once per search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedQuery {
	/// Form used against the local client store.
	pub local: String,
	/// Form sent to remote providers, whitespace runs collapsed into `%`.
	pub remote: String,
	/// Whether the local form consists of ASCII digits only.
	pub numeric: bool,
}

/// Returns `None` when the query is blank after trimming.
pub fn normalize(raw: &str) -> Option<NormalizedQuery> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	let local = local_form(trimmed);

	Some(NormalizedQuery {
		local: local.to_string(),
		remote: remote_form(local),
		numeric: is_numeric(local),
	})
}

/// Drops the trunk prefix from a ten digit phone number such as `0911234567`.
pub fn local_form(trimmed: &str) -> &str {
	let bytes = trimmed.as_bytes();

	if bytes.len() == 10 && bytes[0] == b'0' && bytes.iter().all(u8::is_ascii_digit) {
		return &trimmed[1..];
	}

	trimmed
}

pub fn remote_form(local: &str) -> String {
	let mut out = String::with_capacity(local.len());
	let mut in_whitespace = false;

	for ch in local.chars() {
		if ch.is_whitespace() {
			if !in_whitespace {
				out.push('%');
			}

			in_whitespace = true;

			continue;
		}

		in_whitespace = false;

		out.push(ch);
	}

	out
}

pub fn is_numeric(local: &str) -> bool {
	!local.is_empty() && local.bytes().all(|byte| byte.is_ascii_digit())
}

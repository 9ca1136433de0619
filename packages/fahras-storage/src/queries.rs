use crate::{Result, db::Db, models::ClientRow};

/// Local client lookup parameters.
#[derive(Clone, Copy, Debug)]
pub struct ClientSearch<'a> {
	pub query: &'a str,
	/// Numeric queries also match `national_id` and `phone` exactly.
	pub numeric: bool,
	/// `None` searches every account.
	pub account_id: Option<i64>,
	pub limit: u32,
}

pub async fn search_clients(db: &Db, search: ClientSearch<'_>) -> Result<Vec<ClientRow>> {
	let rows = sqlx::query_as::<_, ClientRow>(
		"\
SELECT
	c.id,
	c.account_id,
	a.name AS account_name,
	c.name,
	c.contracts,
	c.national_id,
	c.sell_date,
	c.work,
	c.home_address,
	c.work_address,
	c.phone,
	c.status,
	c.court_status,
	c.created_at,
	c.updated_at,
	(SELECT COUNT(*) FROM attachments t WHERE t.client_id = c.id) AS attachment_count
FROM clients c
JOIN accounts a ON a.id = c.account_id
WHERE ($1::bigint IS NULL OR c.account_id = $1)
	AND (
		c.name ILIKE $2
		OR c.national_id ILIKE $2
		OR c.phone ILIKE $2
		OR ($3::boolean AND (c.national_id = $4 OR c.phone = $4))
	)
ORDER BY c.id DESC
LIMIT $5",
	)
	.bind(search.account_id)
	.bind(contains_pattern(search.query))
	.bind(search.numeric)
	.bind(search.query)
	.bind(i64::from(search.limit))
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// `ILIKE` pattern matching `query` anywhere, with wildcard characters in `query` taken
/// literally.
pub fn contains_pattern(query: &str) -> String {
	let mut pattern = String::with_capacity(query.len() + 2);

	pattern.push('%');

	for ch in query.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			pattern.push('\\');
		}

		pattern.push(ch);
	}

	pattern.push('%');

	pattern
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wraps_query_in_wildcards() {
		assert_eq!(contains_pattern("ali"), "%ali%");
	}

	#[test]
	fn escapes_like_metacharacters() {
		assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
	}
}

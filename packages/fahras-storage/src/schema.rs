pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_accounts.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_accounts.sql")),
				"tables/002_clients.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_clients.sql")),
				"tables/003_attachments.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_attachments.sql")),
				"tables/004_remote_sources.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_remote_sources.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn expands_every_table_include() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "));

		for table in ["accounts", "clients", "attachments", "remote_sources"] {
			assert!(
				sql.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")),
				"Missing table {table}."
			);
		}
	}
}

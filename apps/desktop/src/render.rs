//! Plain-text rendering of users for terminal output.

use shared::{domain::UserRecord, links::UserLinks};

const HEADERS: [&str; 6] = ["ID", "Name / Email", "Address", "Phone", "Website", "Company"];

fn table_row(user: &UserRecord) -> [String; 6] {
    [
        user.id.to_string(),
        format!("{} <{}>", user.name, user.email),
        user.address.summary(),
        user.phone.clone(),
        user.website.clone(),
        user.company.name.clone(),
    ]
}

/// Columns are padded to the widest cell; rows keep the order given.
pub fn render_table(users: &[UserRecord]) -> String {
    let rows: Vec<[String; 6]> = users.iter().map(table_row).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_detail(user: &UserRecord) -> String {
    let links = UserLinks::for_user(user);
    let address = &user.address;
    let company = &user.company;
    format!(
        "{name} (#{id})\n\
         Email:       {email} ({mailto})\n\
         \n\
         Address\n\
         \x20 {street}, {suite}\n\
         \x20 {city}, {zipcode}\n\
         \x20 Map: {map}\n\
         \n\
         Contact\n\
         \x20 Phone:     {phone}\n\
         \x20 Website:   {website} ({website_url})\n\
         \n\
         Company\n\
         \x20 Name:        {company_name}\n\
         \x20 Catchphrase: {catch_phrase}\n\
         \x20 Business:    {bs}\n",
        name = user.name,
        id = user.id,
        email = user.email,
        mailto = links.mailto,
        street = address.street,
        suite = address.suite,
        city = address.city,
        zipcode = address.zipcode,
        map = links.map,
        phone = user.phone,
        website = user.website,
        website_url = links.website,
        company_name = company.name,
        catch_phrase = company.catch_phrase,
        bs = company.bs,
    )
}

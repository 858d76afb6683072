// src/db/queries.rs
//
// Nested JSON selects. Each builder takes the alias of the row it renders,
// so the same shape can be embedded at different depths of the snapshot.

use std::sync::LazyLock;

fn job_json(j: &str) -> String {
    format!(
        r#"json_build_object(
            'id', {j}.id,
            'customer_id', {j}.customer_id,
            'location_id', {j}.location_id,
            'status', {j}.status,
            'created_at', {j}.created_at,
            'profiles', COALESCE((
                SELECT json_agg(json_build_object('profile_id', jp.profile_id, 'role', jp.role))
                FROM job_profiles jp
                WHERE jp.job_id = {j}.id
            ), '[]'::json),
            'products', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', jpr.id,
                    'product_id', jpr.product_id,
                    'units', jpr.units,
                    'product', (
                        SELECT json_build_object(
                            'id', pr.id, 'name', pr.name,
                            'unit_label', pr.unit_label, 'unit_price', pr.unit_price
                        )
                        FROM products pr
                        WHERE pr.id = jpr.product_id
                    )
                ) ORDER BY jpr.id)
                FROM job_products jpr
                WHERE jpr.job_id = {j}.id
            ), '[]'::json),
            'media', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', jm.id, 'media_type', jm.media_type,
                    'url', jm.url, 'created_at', jm.created_at
                ) ORDER BY jm.id)
                FROM job_media jm
                WHERE jm.job_id = {j}.id
            ), '[]'::json),
            'payments', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', pay.id, 'amount', pay.amount,
                    'method', pay.method, 'paid_at', pay.paid_at
                ) ORDER BY pay.id)
                FROM payments pay
                WHERE pay.job_id = {j}.id
            ), '[]'::json)
        )"#
    )
}

fn appointment_json(a: &str) -> String {
    format!(
        r#"json_build_object(
            'id', {a}.id,
            'customer_id', {a}.customer_id,
            'closer_id', {a}.closer_id,
            'start_time', {a}.start_time,
            'end_time', {a}.end_time
        )"#
    )
}

fn bid_json(b: &str) -> String {
    format!(
        r#"json_build_object(
            'id', {b}.id,
            'customer_id', {b}.customer_id,
            'name', {b}.name,
            'hoa_approval_required', {b}.hoa_approval_required,
            'hoa_name', {b}.hoa_name,
            'hoa_phone', {b}.hoa_phone,
            'hoa_email', {b}.hoa_email,
            'has_water_rebate', {b}.has_water_rebate,
            'water_rebate_company', {b}.water_rebate_company,
            'products', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', bp.id, 'product_id', bp.product_id, 'units', bp.units
                ) ORDER BY bp.id)
                FROM bid_products bp
                WHERE bp.bid_id = {b}.id
            ), '[]'::json),
            'media', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', bm.id, 'media_type', bm.media_type, 'url', bm.url
                ) ORDER BY bm.id)
                FROM bid_media bm
                WHERE bm.bid_id = {b}.id
            ), '[]'::json)
        )"#
    )
}

fn customer_json(c: &str) -> String {
    let appointment = appointment_json("ca");
    let job = job_json("cj");
    let bid = bid_json("b");
    format!(
        r#"json_build_object(
            'id', {c}.id,
            'location_id', {c}.location_id,
            'first_name', {c}.first_name,
            'last_name', {c}.last_name,
            'email', {c}.email,
            'phone', {c}.phone,
            'address', {c}.address,
            'city', {c}.city,
            'state', {c}.state,
            'zip', {c}.zip,
            'disposition_status', {c}.disposition_status,
            'closer_id', {c}.closer_id,
            'created_at', {c}.created_at,
            'appointments', COALESCE((
                SELECT json_agg({appointment} ORDER BY ca.start_time)
                FROM appointments ca
                WHERE ca.customer_id = {c}.id
            ), '[]'::json),
            'jobs', COALESCE((
                SELECT json_agg({job} ORDER BY cj.id)
                FROM jobs cj
                WHERE cj.customer_id = {c}.id
            ), '[]'::json),
            'bids', COALESCE((
                SELECT json_agg({bid} ORDER BY b.id)
                FROM bids b
                WHERE b.customer_id = {c}.id
            ), '[]'::json),
            'notes', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', n.id, 'customer_id', n.customer_id, 'author_id', n.author_id,
                    'body', n.body, 'created_at', n.created_at
                ) ORDER BY n.created_at DESC)
                FROM notes n
                WHERE n.customer_id = {c}.id
            ), '[]'::json)
        )"#
    )
}

fn location_json(l: &str) -> String {
    let customer = customer_json("c");
    let job = job_json("j");
    let appointment = appointment_json("a");
    format!(
        r#"json_build_object(
            'id', {l}.id,
            'name', {l}.name,
            'address', {l}.address,
            'city', {l}.city,
            'state', {l}.state,
            'zip', {l}.zip,
            'phone', {l}.phone,
            'customers', COALESCE((
                SELECT json_agg({customer} ORDER BY c.id)
                FROM customers c
                WHERE c.location_id = {l}.id
            ), '[]'::json),
            'jobs', COALESCE((
                SELECT json_agg({job} ORDER BY j.id)
                FROM jobs j
                WHERE j.location_id = {l}.id
            ), '[]'::json),
            'profiles', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', m.id,
                    'is_closer', m.is_closer,
                    'is_setter', m.is_setter,
                    'is_installer', m.is_installer,
                    'is_manager', m.is_manager,
                    'is_admin', m.is_admin,
                    'profile', json_build_object(
                        'id', mp.id, 'full_name', mp.full_name, 'avatar_url', mp.avatar_url
                    )
                ) ORDER BY m.id)
                FROM location_profiles m
                JOIN profiles mp ON mp.id = m.profile_id
                WHERE m.location_id = {l}.id
            ), '[]'::json),
            'appointments', COALESCE((
                SELECT json_agg({appointment} ORDER BY a.start_time)
                FROM appointments a
                WHERE a.location_id = {l}.id
            ), '[]'::json),
            'channels', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', ch.id,
                    'name', ch.name,
                    'members', COALESCE((
                        SELECT json_agg(json_build_object(
                            'id', cpp.id, 'full_name', cpp.full_name, 'avatar_url', cpp.avatar_url
                        ))
                        FROM channel_profiles cp
                        JOIN profiles cpp ON cpp.id = cp.profile_id
                        WHERE cp.channel_id = ch.id
                    ), '[]'::json)
                ) ORDER BY ch.id)
                FROM channels ch
                WHERE ch.location_id = {l}.id
            ), '[]'::json)
        )"#
    )
}

/// Profile, every membership, and each location's full snapshot. `$1` is the profile id.
pub static PROFILE_SNAPSHOT: LazyLock<String> = LazyLock::new(|| {
    let location = location_json("l");
    format!(
        r#"
        SELECT json_build_object(
            'id', p.id,
            'full_name', p.full_name,
            'avatar_url', p.avatar_url,
            'email', p.email,
            'phone', p.phone,
            'location_profiles', COALESCE((
                SELECT json_agg(json_build_object(
                    'id', lp.id,
                    'location_id', lp.location_id,
                    'is_closer', lp.is_closer,
                    'is_setter', lp.is_setter,
                    'is_installer', lp.is_installer,
                    'is_manager', lp.is_manager,
                    'is_admin', lp.is_admin,
                    'location', {location}
                ) ORDER BY lp.id)
                FROM location_profiles lp
                JOIN locations l ON l.id = lp.location_id
                WHERE lp.profile_id = p.id
            ), '[]'::json)
        )
        FROM profiles p
        WHERE p.id = $1
        "#
    )
});

/// A single job with products (and their catalog rows), media, payments. `$1` is the job id.
pub static JOB_DETAIL: LazyLock<String> = LazyLock::new(|| {
    let job = job_json("j");
    format!("SELECT {job} FROM jobs j WHERE j.id = $1")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_query_binds_profile_id_once() {
        assert_eq!(PROFILE_SNAPSHOT.matches("$1").count(), 1);
        assert!(PROFILE_SNAPSHOT.contains("FROM customers c"));
        assert!(PROFILE_SNAPSHOT.contains("FROM jobs cj"));
        assert!(PROFILE_SNAPSHOT.contains("FROM channels ch"));
    }

    #[test]
    fn job_detail_includes_catalog_products() {
        assert!(JOB_DETAIL.contains("FROM products pr"));
        assert!(JOB_DETAIL.ends_with("WHERE j.id = $1"));
    }

    #[test]
    fn fragments_are_balanced() {
        for sql in [PROFILE_SNAPSHOT.as_str(), JOB_DETAIL.as_str()] {
            assert_eq!(sql.matches('(').count(), sql.matches(')').count());
        }
    }
}

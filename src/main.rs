//! MatchBuddy CLI
//!
//! Thin terminal shell over the application core: every rule lives in the
//! library, this binary only parses arguments and prints results.

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use MatchBuddy::{
    config::Settings,
    middleware::{require_capability, resolve_route, Capability, Route, RouteDecision},
    models::{
        KakaoLoginPayload, ManualMatchPayload, Member, MemberProfileUpdate, MemberStatus,
        NotificationType, OverrideVoteRequest, ParticipationStatus,
    },
    services::{attendee_summary, display_label, evaluate_match_status, ServiceFactory, VotePhase},
    utils::{logging, time as timeutil},
    MatchBuddyError,
};

#[derive(Parser)]
#[command(name = "matchbuddy")]
#[command(about = "Club match scheduling and attendance voting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Kakao authorize URL for the login entry point
    LoginUrl,
    /// Log in with a Kakao identity and store the session credential
    Login {
        kakao_id: String,
        name: String,
        email: String,
        #[arg(long)]
        picture_url: Option<String>,
    },
    /// Clear the stored session credential
    Logout,
    /// List upcoming matches with their voting window and my vote
    Matches,
    /// Cast or change my vote on a match (attending | absent | pending)
    Vote {
        match_id: i64,
        status: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show a match roster grouped by vote status (manager)
    Roster {
        match_id: i64,
    },
    /// Force-write a member's vote, bypassing the voting window (manager)
    Override {
        match_id: i64,
        member_id: i64,
        status: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// List saved match templates
    Templates,
    /// Generate a match from a template for a date (YYYY-MM-DD, manager)
    Generate {
        template_id: i64,
        date: String,
    },
    /// Create a one-off match without a template (manager)
    CreateMatch {
        name: String,
        location: String,
        /// Kickoff date, KST (YYYY-MM-DD)
        date: String,
        /// Kickoff time, KST (HH:MM)
        time: String,
        #[arg(long, default_value_t = 120)]
        duration: i64,
        #[arg(long, default_value_t = 10)]
        min: i64,
        #[arg(long, default_value_t = 22)]
        max: i64,
        /// Voting opens, KST (YYYY-MM-DDTHH:MM); defaults to kickoff - 6d
        #[arg(long)]
        poll: Option<String>,
        /// Soft deadline, KST (YYYY-MM-DDTHH:MM); defaults to kickoff - 2d
        #[arg(long)]
        soft: Option<String>,
        /// Hard deadline, KST (YYYY-MM-DDTHH:MM); defaults to kickoff - 1d
        #[arg(long)]
        hard: Option<String>,
    },
    /// Update my profile fields
    Profile {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        birth_year: Option<i32>,
        #[arg(long)]
        back_number: Option<i32>,
        /// Comma-separated position codes, e.g. ST,CDM
        #[arg(long)]
        positions: Option<String>,
        #[arg(long)]
        picture_url: Option<String>,
    },
    /// List club members (manager)
    Members,
    /// Approve a pending member (manager)
    Approve {
        member_id: i64,
    },
    /// Reject a member (manager)
    Reject {
        member_id: i64,
    },
    /// Preview or send a notification (manager)
    Notify {
        match_id: i64,
        /// polling_start | soft_deadline | hard_deadline
        kind: String,
        /// Kakao access token; when given, sends the message to yourself
        #[arg(long)]
        send_with_token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::new().unwrap_or_default();
    settings.validate().context("invalid configuration")?;
    logging::init_logging(&settings.logging)?;

    let cli = Cli::parse();
    let services = ServiceFactory::new(settings.clone()).await?;

    match cli.command {
        Commands::LoginUrl => {
            let (url, state) = services.kakao_service.authorize_url();
            println!("{url}");
            println!("state: {state}");
        }

        Commands::Login {
            kakao_id,
            name,
            email,
            picture_url,
        } => {
            let payload = KakaoLoginPayload { kakao_id, name, email };
            let member = services.session_service.login(payload, picture_url).await?;
            match member.status {
                MemberStatus::Active => println!("{}님, 환영합니다!", member.name),
                _ => println!("{}님, 가입 승인 대기 중입니다.", member.name),
            }
        }

        Commands::Logout => {
            services.session_service.logout().await?;
            println!("로그아웃 되었습니다.");
        }

        Commands::Matches => {
            require_route(&services, Route::Dashboard).await?;
            let data = services.match_service.load_dashboard().await?;
            services.voting_service.install_votes(data.participations).await;

            if data.matches.is_empty() {
                println!("예정된 매치가 없습니다.");
            }

            let now = Utc::now();
            for game in &data.matches {
                let window = evaluate_match_status(game, now);
                let my_vote = services
                    .voting_service
                    .my_vote(game.id)
                    .await
                    .map(|p| p.status.label().to_string())
                    .unwrap_or_else(|| "미투표".to_string());

                println!(
                    "#{} [{}] {} · {} · {} · 내 상태: {}",
                    game.id,
                    timeutil::d_day(game.start_time, now),
                    game.name,
                    timeutil::format_long(game.start_time),
                    display_label(game, now),
                    my_vote,
                );

                if let Some(reason) = window.reason {
                    println!("    {reason}");
                } else if let Some(countdown) = timeutil::remaining(game.hard_deadline_at, now) {
                    if !countdown.expired {
                        println!(
                            "    투표 마감까지 {}일 {}시간 {}분",
                            countdown.days, countdown.hours, countdown.minutes
                        );
                    }
                }
            }
        }

        Commands::Vote {
            match_id,
            status,
            comment,
        } => {
            require_route(&services, Route::Dashboard).await?;
            let status: ParticipationStatus = status
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;

            let game = services.match_service.find(match_id).await?;
            let window = evaluate_match_status(&game, Utc::now());
            if window.phase == VotePhase::NotYetOpen {
                return Err(MatchBuddyError::VotingNotOpen { match_id }.into());
            }

            let participation = services.voting_service.submit_vote(&game, status, comment).await?;
            println!(
                "투표 완료: {} → {}",
                game.name,
                participation.status.label()
            );
        }

        Commands::Roster { match_id } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::ManageMatches)?;

            let game = services.match_service.find(match_id).await?;
            let roster = services.roster_service.roster_for(&game);
            let counts = roster.counts();
            println!(
                "{} | 참석 {} · 불참 {} · 미정 {}",
                game.name, counts.attending, counts.absent, counts.pending
            );

            for (label, bucket) in [
                ("참석", &roster.attending),
                ("불참", &roster.absent),
                ("미정", &roster.pending),
            ] {
                println!("[{label}]");
                for p in bucket {
                    let name = p
                        .member
                        .as_ref()
                        .map(|m| m.name.clone())
                        .unwrap_or_else(|| format!("회원 {}", p.member_id));
                    match &p.comment {
                        Some(comment) => println!("  {name} 💬 {comment}"),
                        None => println!("  {name}"),
                    }
                }
            }

            println!("\n{}", attendee_summary(&game, &roster));
        }

        Commands::Override {
            match_id,
            member_id,
            status,
            comment,
        } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::OverrideVotes)?;

            let status: ParticipationStatus = status
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;

            let request = OverrideVoteRequest {
                match_id,
                member_id,
                status,
                comment,
            };
            let participation = services.roster_service.override_vote(request).await?;
            println!(
                "변경 완료: 회원 {} → {}",
                participation.member_id,
                participation.status.label()
            );
        }

        Commands::Templates => {
            require_route(&services, Route::Dashboard).await?;
            let templates = services.match_service.templates().await?;
            if templates.is_empty() {
                println!("등록된 템플릿이 없습니다.");
            }
            for template in templates {
                let schedule = template
                    .schedule_line()
                    .unwrap_or_else(|_| "일정 정보 없음".to_string());
                println!(
                    "#{} {} · {} · {} · 최소 {}명 / 최대 {}명",
                    template.id,
                    template.name,
                    schedule,
                    template.location,
                    template.min_participants,
                    template.max_participants,
                );
            }
        }

        Commands::Generate { template_id, date } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::ManageMatches)?;

            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .context("날짜는 YYYY-MM-DD 형식이어야 합니다")?;
            let template = services.match_service.find_template(template_id).await?;
            let game = services.match_service.generate_from_template(template.id, date).await?;
            println!(
                "'{}' 템플릿으로 경기가 생성되었습니다: #{} {} ({})",
                template.name,
                game.id,
                game.name,
                timeutil::format_long(game.start_time)
            );
        }

        Commands::CreateMatch {
            name,
            location,
            date,
            time,
            duration,
            min,
            max,
            poll,
            soft,
            hard,
        } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::ManageMatches)?;

            let start_time = timeutil::combine_date_and_time_as_utc(&date, &time)?;
            let payload = ManualMatchPayload {
                club_id: settings.club.club_id,
                name,
                location,
                description: None,
                start_time,
                duration_minutes: duration,
                polling_start_at: parse_input_instant(poll.as_deref())?,
                soft_deadline_at: parse_input_instant(soft.as_deref())?,
                hard_deadline_at: parse_input_instant(hard.as_deref())?,
                min_participants: min,
                max_participants: max,
            };

            let game = services.match_service.create_manual(payload).await?;
            println!(
                "스페셜 매치가 생성되었습니다: #{} {} ({})",
                game.id,
                game.name,
                timeutil::format_long(game.start_time)
            );
        }

        Commands::Profile {
            phone,
            birth_year,
            back_number,
            positions,
            picture_url,
        } => {
            require_route(&services, Route::Settings).await?;
            let patch = MemberProfileUpdate {
                phone,
                birth_year,
                back_number,
                positions: positions
                    .map(|raw| raw.split(',').map(|p| p.trim().to_string()).collect()),
                picture_url,
            };
            let member = services.member_service.update_my_profile(patch).await?;
            services.session_service.install_member(member.clone()).await;
            println!("프로필이 수정되었습니다: {}", member.name);
        }

        Commands::Members => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::ManageMembers)?;

            for m in services.member_service.list_members().await? {
                println!("#{} {} · {:?} · {:?}", m.id, m.name, m.status, m.roles);
            }
        }

        Commands::Approve { member_id } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::ManageMembers)?;
            let approved = services.member_service.approve_member(member_id).await?;
            println!("{}님이 승인되었습니다.", approved.name);
        }

        Commands::Reject { member_id } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::ManageMembers)?;
            let rejected = services.member_service.reject_member(member_id).await?;
            println!("{}님이 거절되었습니다.", rejected.name);
        }

        Commands::Notify {
            match_id,
            kind,
            send_with_token,
        } => {
            let member = require_route(&services, Route::Manager).await?;
            require_capability(&member, Capability::SendNotifications)?;

            let kind: NotificationType = kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;

            let message = services.notification_service.preview(match_id, kind).await?;
            println!("--- {} 미리보기 ---\n{message}", kind.label());

            if let Some(token) = send_with_token {
                services.notification_service.test_send(match_id, kind, &token).await?;
                println!("\n메시지 전송 성공! 📱");
            }
        }
    }

    Ok(())
}

/// Parse an optional `YYYY-MM-DDTHH:MM` KST input string into a UTC instant
fn parse_input_instant(raw: Option<&str>) -> MatchBuddy::Result<Option<chrono::DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(raw) => {
            let (date, time) = raw.split_once('T').ok_or_else(|| {
                MatchBuddyError::InvalidInput(format!("일시는 YYYY-MM-DDTHH:MM 형식이어야 합니다: {raw}"))
            })?;
            timeutil::combine_date_and_time_as_utc(date, time).map(Some)
        }
    }
}

/// Bootstrap the session and run the route guard for `route`, translating
/// redirects into user-facing failures
async fn require_route(services: &ServiceFactory, route: Route) -> anyhow::Result<Member> {
    let state = services.session_service.bootstrap().await?;

    match resolve_route(&state, route) {
        RouteDecision::Allow => match state.member() {
            Some(member) => Ok(member.clone()),
            None => bail!("로그인이 필요합니다. `matchbuddy login` 을 먼저 실행하세요."),
        },
        RouteDecision::Redirect { to: Route::Login, .. } => {
            bail!("로그인이 필요합니다. `matchbuddy login` 을 먼저 실행하세요.")
        }
        RouteDecision::Redirect { to: Route::Pending, .. } => {
            bail!("가입 승인 대기 중입니다. 운영진 승인 후 이용할 수 있습니다.")
        }
        RouteDecision::Redirect { notice, .. } => {
            bail!(notice.unwrap_or_else(|| "접근할 수 없는 페이지입니다.".to_string()))
        }
        RouteDecision::Wait => bail!("세션 확인 중입니다. 잠시 후 다시 시도하세요."),
    }
}

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use yamavel_core::{Result, YamavelError};

/// Replace every `{{key}}` marker with its value. Substitution is literal:
/// values are not escaped and are not rescanned for markers of keys that
/// were already applied.
pub fn render_template(template: &str, context: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in context {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

/// The four artifacts the generator knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    CreateMigration,
    UpdateMigration,
    Model,
    Resource,
}

impl TemplateKind {
    /// File name of the stub that overrides this template.
    pub fn stub_name(self) -> &'static str {
        match self {
            TemplateKind::CreateMigration => "migration.stub",
            TemplateKind::UpdateMigration => "update_migration.stub",
            TemplateKind::Model => "model.stub",
            TemplateKind::Resource => "filament_resource.stub",
        }
    }

    pub fn builtin(self) -> &'static str {
        match self {
            TemplateKind::CreateMigration => CREATE_MIGRATION_TEMPLATE,
            TemplateKind::UpdateMigration => UPDATE_MIGRATION_TEMPLATE,
            TemplateKind::Model => MODEL_TEMPLATE,
            TemplateKind::Resource => RESOURCE_TEMPLATE,
        }
    }
}

/// Built-in templates, optionally overridden by stub files from a project
/// directory.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    stubs_dir: Option<PathBuf>,
}

impl TemplateStore {
    pub fn new(stubs_dir: Option<PathBuf>) -> Self {
        Self { stubs_dir }
    }

    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load a template. A stub present in the stubs directory wins; an
    /// unreadable stub is an error rather than a silent fallback.
    pub fn load(&self, kind: TemplateKind) -> Result<Cow<'static, str>> {
        let Some(dir) = self.stubs_dir.as_deref() else {
            return Ok(Cow::Borrowed(kind.builtin()));
        };

        let path = dir.join(kind.stub_name());
        if !path.exists() {
            return Ok(Cow::Borrowed(kind.builtin()));
        }

        tracing::debug!(stub = %path.display(), "using stub override");
        read_stub(&path).map(Cow::Owned)
    }
}

fn read_stub(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| YamavelError::read(path, e))
}

pub static CREATE_MIGRATION_TEMPLATE: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    /**
     * Run the migrations.
     */
    public function up(): void
    {
        Schema::create('{{table}}', function (Blueprint $table) {
            {{columns}}
        });
    }

    /**
     * Reverse the migrations.
     */
    public function down(): void
    {
        Schema::dropIfExists('{{table}}');
    }
};
"#;

pub static UPDATE_MIGRATION_TEMPLATE: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    /**
     * Run the migrations.
     */
    public function up(): void
    {
        Schema::table('{{table}}', function (Blueprint $table) {
            {{columns}}
        });
    }

    /**
     * Reverse the migrations.
     */
    public function down(): void
    {
        Schema::table('{{table}}', function (Blueprint $table) {
            {{dropColumns}}
        });
    }
};
"#;

pub static MODEL_TEMPLATE: &str = r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{model}} extends Model
{
    use HasFactory;

    protected $table = '{{table}}';

    protected $fillable = [{{fillable}}];

    protected $hidden = [{{hidden}}];

    {{relations}}
}
"#;

pub static RESOURCE_TEMPLATE: &str = r#"<?php

namespace App\Filament\Resources;

use App\Models\{{model}};
use Filament\Forms;
use Filament\Forms\Form;
use Filament\Resources\Resource;
use Filament\Tables;
use Filament\Tables\Table;

class {{model}}Resource extends Resource
{
    protected static ?string $model = {{model}}::class;

    protected static ?string $navigationIcon = 'heroicon-o-rectangle-stack';

    public static function form(Form $form): Form
    {
        return $form
            ->schema([
                {{formFields}}
            ]);
    }

    public static function table(Table $table): Table
    {
        return $table
            ->columns([
                {{tableColumns}}
            ]);
    }
}
"#;

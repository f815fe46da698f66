use std::collections::BTreeMap;

use serde::Serialize;

use crate::configuration::config::Config;

/// How a question is asked and answered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Date,
    Text,
    Select,
    Number,
    Boolean,
}

/// One question of a crime-type schema, in officer-reviewed wording.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
    pub required: bool,
}

/// Label and ordered question list for one crime type.
#[derive(Debug, Clone, Serialize)]
pub struct CrimeSchema {
    pub tag: &'static str,
    pub label: &'static str,
    pub questions: &'static [Question],
}

const fn question(id: &'static str, label: &'static str, kind: QuestionKind) -> Question {
    Question {
        id,
        label,
        kind,
        options: &[],
        required: false,
    }
}

const fn select(
    id: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> Question {
    Question {
        id,
        label,
        kind: QuestionKind::Select,
        options,
        required: false,
    }
}

static ROUBO_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do fato", QuestionKind::Date),
    question("hora_fato", "Hora aproximada do fato", QuestionKind::Text),
    question("local_fato", "Local onde ocorreu o fato", QuestionKind::Text),
    question(
        "autores_desc",
        "Descrição dos autores (quantidade, vestimentas, aparência)",
        QuestionKind::Text,
    ),
    select(
        "meio_utilizado",
        "Meio utilizado (arma de fogo, faca, outro)",
        &[
            "Arma de fogo",
            "Arma branca (faca/canivete)",
            "Sem arma (força física)",
            "Outro",
        ],
    ),
    question("bens_subtraidos", "Bens subtraídos (descreva)", QuestionKind::Text),
    question("valor_estimado", "Valor estimado dos bens (R$)", QuestionKind::Number),
    question(
        "veiculo_fuga",
        "Houve veículo de fuga? Descreva (cor, modelo, placa)",
        QuestionKind::Text,
    ),
    question("lesoes", "Houve lesões corporais?", QuestionKind::Boolean),
    question("testemunhas", "Há testemunhas? Nomes/contatos", QuestionKind::Text),
];

static FURTO_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do fato (ou período estimado)", QuestionKind::Date),
    question("local_fato", "Local onde ocorreu o fato", QuestionKind::Text),
    question("bens_subtraidos", "Bens subtraídos (descreva)", QuestionKind::Text),
    question("valor_estimado", "Valor estimado dos bens (R$)", QuestionKind::Number),
    question(
        "forma_acesso",
        "Como o autor teve acesso? (arrombamento, chave falsa, etc.)",
        QuestionKind::Text,
    ),
    question("suspeitos", "Há suspeitos? Descreva", QuestionKind::Text),
    question("testemunhas", "Há testemunhas?", QuestionKind::Text),
    question("cameras", "Há câmeras de segurança no local?", QuestionKind::Boolean),
];

static ESTELIONATO_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do fato", QuestionKind::Date),
    select(
        "modalidade",
        "Modalidade do estelionato",
        &[
            "Falso vendedor/produto",
            "Falso funcionário público",
            "Golpe do PIX/transferência",
            "Empréstimo não devolvido",
            "Cheque sem fundo",
            "Romance/namoro virtual",
            "Outro",
        ],
    ),
    question("descricao_golpe", "Descreva como ocorreu o golpe", QuestionKind::Text),
    question("valor_prejuizo", "Valor do prejuízo (R$)", QuestionKind::Number),
    question(
        "meio_contato",
        "Como o autor entrou em contato? (telefone, internet, pessoalmente)",
        QuestionKind::Text,
    ),
    question("identificacao_autor", "Como o autor se identificou?", QuestionKind::Text),
    question(
        "docs_provas",
        "Possui documentos ou prints como prova?",
        QuestionKind::Boolean,
    ),
    question(
        "conta_bancaria",
        "Houve transação bancária? Informe banco e tipo (PIX/TED/outro)",
        QuestionKind::Text,
    ),
];

static LESAO_CORPORAL_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do fato", QuestionKind::Date),
    question("hora_fato", "Hora aproximada", QuestionKind::Text),
    question("local_fato", "Local do fato", QuestionKind::Text),
    question(
        "relacao_autor",
        "Qual a relação com o autor? (desconhecido, familiar, colega)",
        QuestionKind::Text,
    ),
    question("desc_autor", "Descrição do autor (nome, se conhecido)", QuestionKind::Text),
    select(
        "tipo_lesao",
        "Tipo de lesão sofrida",
        &[
            "Socos/tapas",
            "Chutes",
            "Objeto contundente",
            "Arma branca",
            "Arma de fogo",
            "Outro",
        ],
    ),
    question("regiao_corpo", "Região do corpo afetada", QuestionKind::Text),
    question("atendimento_medico", "Houve atendimento médico?", QuestionKind::Boolean),
    question("testemunhas", "Há testemunhas?", QuestionKind::Text),
    select(
        "historico_violencia",
        "É a primeira ocorrência ou há histórico?",
        &[
            "Primeira vez",
            "Episódio repetido",
            "Há medida protetiva anterior",
        ],
    ),
];

static MARIA_DA_PENHA_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do último episódio", QuestionKind::Date),
    select(
        "tipo_violencia",
        "Tipo de violência sofrida",
        &[
            "Física",
            "Psicológica",
            "Moral",
            "Sexual",
            "Patrimonial",
            "Múltiplos tipos",
        ],
    ),
    select(
        "relacao_agressor",
        "Relação com o agressor",
        &[
            "Cônjuge/companheiro(a)",
            "Ex-cônjuge/ex-companheiro(a)",
            "Namorado(a)/ex-namorado(a)",
            "Familiar (pai, irmão, filho)",
            "Outro",
        ],
    ),
    question(
        "filhos_envolvidos",
        "Há filhos menores envolvidos?",
        QuestionKind::Boolean,
    ),
    question("medida_protetiva", "Já possui medida protetiva?", QuestionKind::Boolean),
    question("descricao_episodio", "Descreva o último episódio", QuestionKind::Text),
    question(
        "historico",
        "Há quanto tempo sofre violência? Descreva histórico",
        QuestionKind::Text,
    ),
    question("reside_agressor", "Reside com o agressor?", QuestionKind::Boolean),
    question(
        "atendimento_medico",
        "Houve necessidade de atendimento médico?",
        QuestionKind::Boolean,
    ),
    question("testemunhas", "Há testemunhas dos episódios?", QuestionKind::Text),
];

static AMEACA_QUESTIONS: &[Question] = &[
    question("data_fato", "Data da ameaça", QuestionKind::Date),
    select(
        "meio_ameaca",
        "Como a ameaça foi realizada?",
        &[
            "Pessoalmente",
            "Por telefone",
            "Por mensagem/app",
            "Por terceiros",
            "Outro",
        ],
    ),
    question("conteudo_ameaca", "Qual o conteúdo da ameaça?", QuestionKind::Text),
    question("relacao_autor", "Relação com o autor da ameaça", QuestionKind::Text),
    question("contexto", "Contexto/motivo da ameaça", QuestionKind::Text),
    question("provas", "Há provas (prints, gravações)?", QuestionKind::Boolean),
    question("medida_protetiva", "Já possui medida protetiva?", QuestionKind::Boolean),
    question("testemunhas", "Há testemunhas?", QuestionKind::Text),
];

static DANO_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do fato", QuestionKind::Date),
    question("bem_danificado", "Bem danificado (descreva)", QuestionKind::Text),
    question("local_fato", "Local onde estava o bem", QuestionKind::Text),
    question("forma_dano", "Como o dano foi causado?", QuestionKind::Text),
    question("valor_prejuizo", "Valor estimado do prejuízo (R$)", QuestionKind::Number),
    question("suspeitos", "Há suspeitos? Descreva", QuestionKind::Text),
    question("motivacao", "Motivação provável", QuestionKind::Text),
    question("cameras", "Há câmeras de segurança?", QuestionKind::Boolean),
];

static OUTROS_QUESTIONS: &[Question] = &[
    question("data_fato", "Data do fato", QuestionKind::Date),
    question("local_fato", "Local do fato", QuestionKind::Text),
    question("descricao", "Descreva o fato ocorrido", QuestionKind::Text),
    question("partes_envolvidas", "Partes envolvidas", QuestionKind::Text),
    question(
        "prejuizo",
        "Houve prejuízo material? Valor estimado (R$)",
        QuestionKind::Number,
    ),
    question("testemunhas", "Há testemunhas?", QuestionKind::Text),
];

/// All supported crime types, in menu order.
pub static CRIME_SCHEMAS: &[CrimeSchema] = &[
    CrimeSchema {
        tag: "roubo",
        label: "Roubo",
        questions: ROUBO_QUESTIONS,
    },
    CrimeSchema {
        tag: "furto",
        label: "Furto",
        questions: FURTO_QUESTIONS,
    },
    CrimeSchema {
        tag: "estelionato",
        label: "Estelionato",
        questions: ESTELIONATO_QUESTIONS,
    },
    CrimeSchema {
        tag: "lesao_corporal",
        label: "Lesão Corporal",
        questions: LESAO_CORPORAL_QUESTIONS,
    },
    CrimeSchema {
        tag: "maria_da_penha",
        label: "Violência Doméstica / Lei Maria da Penha",
        questions: MARIA_DA_PENHA_QUESTIONS,
    },
    CrimeSchema {
        tag: "ameaca",
        label: "Ameaça",
        questions: AMEACA_QUESTIONS,
    },
    CrimeSchema {
        tag: "dano",
        label: "Dano ao Patrimônio",
        questions: DANO_QUESTIONS,
    },
    CrimeSchema {
        tag: "outros",
        label: "Outros",
        questions: OUTROS_QUESTIONS,
    },
];

/// Schema for a crime-type tag, `None` for unknown tags.
pub fn crime_schema(tag: &str) -> Option<&'static CrimeSchema> {
    CRIME_SCHEMAS.iter().find(|schema| schema.tag == tag)
}

/// Human label for a tag; unknown tags fall back to the raw tag.
pub fn crime_label(tag: &str) -> &str {
    match crime_schema(tag) {
        Some(schema) => schema.label,
        None => tag,
    }
}

/// Supported tags in menu order.
pub fn crime_type_tags() -> Vec<&'static str> {
    CRIME_SCHEMAS.iter().map(|schema| schema.tag).collect()
}

/// Photo limits advertised to the intake form.
#[derive(Debug, Clone, Serialize)]
pub struct FormLimits {
    pub max_photos: usize,
    pub max_photo_size_mb: usize,
}

/// Serialized form description stored on each intake link.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub crime_types: Vec<&'static str>,
    pub enabled_fields: BTreeMap<&'static str, bool>,
    pub limits: FormLimits,
    pub questions_by_crime: BTreeMap<&'static str, &'static [Question]>,
}

/// The default form schema: every field enabled, photo limits taken from
/// the runtime configuration.
pub fn default_form_schema(config: &Config) -> FormSchema {
    let enabled_fields = [
        "nome",
        "nascimento",
        "rg",
        "cpf",
        "endereco",
        "relato",
        "fotos",
    ]
    .into_iter()
    .map(|field| (field, true))
    .collect();
    FormSchema {
        crime_types: crime_type_tags(),
        enabled_fields,
        limits: FormLimits {
            max_photos: config.max_photos,
            max_photo_size_mb: config.max_photo_size_mb,
        },
        questions_by_crime: CRIME_SCHEMAS
            .iter()
            .map(|schema| (schema.tag, schema.questions))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(crime_label("roubo"), "Roubo");
        assert_eq!(crime_label("maria_da_penha"), "Violência Doméstica / Lei Maria da Penha");
        assert_eq!(crime_label("desconhecido"), "desconhecido");
        assert!(crime_schema("furto").is_some());
        assert!(crime_schema("x").is_none());
        assert_eq!(crime_type_tags().len(), 8);
    }

    #[test]
    fn test_question_ids_unique_within_schema() {
        for schema in CRIME_SCHEMAS {
            let mut ids: Vec<_> = schema.questions.iter().map(|q| q.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), schema.questions.len(), "schema {}", schema.tag);
        }
    }

    #[test]
    fn test_default_form_schema_serializes() {
        let config = Config::default();
        let schema = default_form_schema(&config);
        let json = serde_json::to_value(&schema).unwrap();

        assert_eq!(json["limits"]["max_photos"], 3);
        assert_eq!(json["enabled_fields"]["fotos"], true);
        assert_eq!(json["crime_types"][0], "roubo");
        assert_eq!(
            json["questions_by_crime"]["roubo"][0]["type"],
            "date"
        );
        assert_eq!(json["questions_by_crime"]["roubo"][0]["id"], "data_fato");
    }
}
